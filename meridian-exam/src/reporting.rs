use crate::models::ExamResult;
use uuid::Uuid;

/// Results belonging to one user, in submission order.
pub fn user_results<'a>(results: &'a [ExamResult], user_id: Uuid) -> Vec<&'a ExamResult> {
    results.iter().filter(|r| r.user_id == user_id).collect()
}

/// Rounded mean of the per-result percentages, or None with no results.
pub fn average_percentage(results: &[ExamResult], user_id: Uuid) -> Option<u32> {
    let own = user_results(results, user_id);
    if own.is_empty() {
        return None;
    }
    let sum: f64 = own.iter().map(|r| r.percentage()).sum();
    Some((sum / own.len() as f64).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    fn result(user_id: Uuid, score: u32, total: u32) -> ExamResult {
        ExamResult {
            id: meridian_core::ids::new_entity_id(),
            exam_id: meridian_core::ids::new_entity_id(),
            user_id,
            answers: HashMap::new(),
            score,
            total_questions: total,
            completed_at: Utc::now(),
            time_taken_minutes: 10.0,
        }
    }

    #[test]
    fn test_results_filtered_per_user() {
        let user = meridian_core::ids::new_entity_id();
        let other = meridian_core::ids::new_entity_id();
        let results = vec![result(user, 3, 5), result(other, 5, 5), result(user, 4, 5)];
        assert_eq!(user_results(&results, user).len(), 2);
    }

    #[test]
    fn test_average_percentage_rounds_mean() {
        let user = meridian_core::ids::new_entity_id();
        // 60% and 80% average to 70%.
        let results = vec![result(user, 3, 5), result(user, 4, 5)];
        assert_eq!(average_percentage(&results, user), Some(70));
        // 33.33% and 66.67% average to 50%.
        let results = vec![result(user, 1, 3), result(user, 2, 3)];
        assert_eq!(average_percentage(&results, user), Some(50));
    }

    #[test]
    fn test_average_with_no_results_is_none() {
        let user = meridian_core::ids::new_entity_id();
        assert_eq!(average_percentage(&[], user), None);
    }
}
