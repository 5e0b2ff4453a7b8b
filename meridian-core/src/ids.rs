use rand::Rng;
use std::collections::HashSet;
use uuid::Uuid;

const PNR_PREFIX: &str = "PNR";
const PNR_RANDOM_LEN: usize = 5;
const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Issue a fresh entity identifier.
pub fn new_entity_id() -> Uuid {
    Uuid::new_v4()
}

/// Generate a booking reference: fixed prefix plus five random base-36
/// characters, retried until it does not collide with an existing code.
pub fn generate_pnr(existing: &HashSet<String>) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let mut code = String::with_capacity(PNR_PREFIX.len() + PNR_RANDOM_LEN);
        code.push_str(PNR_PREFIX);
        for _ in 0..PNR_RANDOM_LEN {
            let idx = rng.gen_range(0..BASE36.len());
            code.push(BASE36[idx] as char);
        }
        if !existing.contains(&code) {
            return code;
        }
        tracing::debug!("PNR collision on {}, retrying", code);
    }
}

/// Assign a seat label: row 1-30, column A-F.
pub fn random_seat_label() -> String {
    let mut rng = rand::thread_rng();
    let row = rng.gen_range(1..=30);
    let column = (b'A' + rng.gen_range(0..6)) as char;
    format!("{}{}", row, column)
}
