use chrono::{NaiveDate, NaiveTime};
use meridian_exam::models::{Exam, Question, QuestionKind};
use meridian_reservation::models::{Aircraft, AircraftStatus, Flight, Sector, ValidationError};
use meridian_reservation::ReservationStore;
use uuid::Uuid;

/// Demo fleet, routes and flights installed for a fresh reservation session.
pub fn sample_reservation_store() -> Result<ReservationStore, ValidationError> {
    let mut store = ReservationStore::new();

    let b737 = store.add_aircraft(Aircraft::new("Boeing 737-800", 189, AircraftStatus::Active)?);
    let a320 = store.add_aircraft(Aircraft::new("Airbus A320", 180, AircraftStatus::Active)?);
    store.add_aircraft(Aircraft::new(
        "Boeing 777-300ER",
        396,
        AircraftStatus::Maintenance,
    )?);

    let ny_la = store.add_sector(Sector::new("New York", "Los Angeles", 2445, "5h 30m")?);
    let chi_mia = store.add_sector(Sector::new("Chicago", "Miami", 1197, "3h 15m")?);
    store.add_sector(Sector::new("San Francisco", "Seattle", 679, "2h 10m")?);

    let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default();
    store.add_flight(Flight::new(
        "HA101",
        b737,
        ny_la,
        date,
        NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
        NaiveTime::from_hms_opt(11, 30, 0).unwrap_or_default(),
        299.0,
        150,
    )?);
    store.add_flight(Flight::new(
        "HA202",
        a320,
        chi_mia,
        date,
        NaiveTime::from_hms_opt(14, 30, 0).unwrap_or_default(),
        NaiveTime::from_hms_opt(17, 45, 0).unwrap_or_default(),
        189.0,
        120,
    )?);

    Ok(store)
}

fn question(prompt: &str, options: &[&str], correct_answer: usize, kind: QuestionKind) -> Question {
    Question {
        id: Uuid::new_v4(),
        prompt: prompt.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer,
        kind,
    }
}

/// Sample exams installed when the exam snapshot is empty.
pub fn sample_exams() -> Vec<Exam> {
    vec![
        Exam {
            id: Uuid::new_v4(),
            title: "JavaScript Fundamentals".to_string(),
            description: "Test your knowledge of JavaScript basics".to_string(),
            duration_minutes: 30,
            total_marks: 50,
            questions: vec![
                question(
                    "Which of the following is NOT a JavaScript data type?",
                    &["String", "Boolean", "Float", "Undefined"],
                    2,
                    QuestionKind::MultipleChoice,
                ),
                question(
                    "JavaScript is a case-sensitive language.",
                    &["True", "False"],
                    0,
                    QuestionKind::TrueFalse,
                ),
                question(
                    "What does DOM stand for?",
                    &[
                        "Document Object Model",
                        "Data Object Management",
                        "Dynamic Object Manipulation",
                        "Document Oriented Markup",
                    ],
                    0,
                    QuestionKind::MultipleChoice,
                ),
                question(
                    "Which method is used to add an element at the end of an array?",
                    &["push()", "pop()", "shift()", "unshift()"],
                    0,
                    QuestionKind::MultipleChoice,
                ),
                question(
                    "The === operator performs type coercion.",
                    &["True", "False"],
                    1,
                    QuestionKind::TrueFalse,
                ),
            ],
        },
        Exam {
            id: Uuid::new_v4(),
            title: "React.js Basics".to_string(),
            description: "Fundamentals of React development".to_string(),
            duration_minutes: 45,
            total_marks: 60,
            questions: vec![
                question(
                    "What is JSX?",
                    &[
                        "JavaScript XML",
                        "Java Syntax Extension",
                        "JSON Extended",
                        "JavaScript Extension",
                    ],
                    0,
                    QuestionKind::MultipleChoice,
                ),
                question(
                    "React components must return a single root element.",
                    &["True", "False"],
                    1,
                    QuestionKind::TrueFalse,
                ),
                question(
                    "Which hook is used for state management in functional components?",
                    &["useEffect", "useState", "useContext", "useRef"],
                    1,
                    QuestionKind::MultipleChoice,
                ),
            ],
        },
    ]
}
