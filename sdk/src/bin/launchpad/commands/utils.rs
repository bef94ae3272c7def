// Console output for launchpad commands. Results go to stdout, problems to stderr.

/// Completed action, e.g. a launched token
pub fn success(msg: &str) {
    println!("[OK] {}", msg);
}

/// Context line: endpoint, addresses, signatures
pub fn info(msg: &str) {
    println!("[INFO] {}", msg);
}

/// Launch step in progress
pub fn progress(msg: &str) {
    println!("[..] {}", msg);
}

pub fn warn(msg: &str) {
    eprintln!("[WARN] {}", msg);
}

/// Failed launch or rejected field
pub fn error(msg: &str) {
    eprintln!("[ERROR] {}", msg);
}

/// Lamports rendered as SOL
pub fn format_sol(lamports: u64) -> String {
    format!(
        "{:.9} SOL",
        lamports as f64 / solana_sdk::native_token::LAMPORTS_PER_SOL as f64
    )
}
