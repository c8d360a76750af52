//! Console presentation for userdb
//!
//! Progress spinners, status lines, user tables and insert statistics.
//! Rendering functions return strings so they can be tested without a
//! terminal.
//!
//! # Quiet Mode
//!
//! Spinners are suppressed when:
//! - `--quiet` flag is passed
//! - `USERDB_QUIET=1` environment variable is set
//! - stderr is not a TTY (piped output)

use std::io::IsTerminal;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use userdb_store::User;

/// Global quiet mode state
static QUIET_MODE: OnceLock<bool> = OnceLock::new();

/// Initialize quiet mode from flags and environment
pub fn init_quiet_mode(quiet_flag: bool) {
    let is_quiet = quiet_flag
        || std::env::var("USERDB_QUIET").map(|v| v == "1").unwrap_or(false)
        || !std::io::stderr().is_terminal();

    QUIET_MODE.set(is_quiet).ok();
}

pub fn is_quiet() -> bool {
    *QUIET_MODE.get().unwrap_or(&false)
}

/// Create a spinner that respects quiet mode
pub fn spinner(msg: impl Into<String>) -> Option<ProgressBar> {
    if is_quiet() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

fn finish(pb: Option<ProgressBar>, msg: String) {
    if let Some(pb) = pb {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.finish_with_message(msg);
    }
}

/// Finish a spinner with a success message
pub fn finish_success(pb: Option<ProgressBar>, msg: impl Into<String>) {
    finish(pb, format!("✓ {}", msg.into()));
}

/// Finish a spinner with an error message
pub fn finish_error(pb: Option<ProgressBar>, msg: impl Into<String>) {
    finish(pb, format!("✗ {}", msg.into()));
}

/// Run a future with a spinner, reporting success or failure when done
pub async fn with_spinner_async<T, E: std::fmt::Display>(
    msg: impl Into<String>,
    success_msg: impl Into<String>,
    f: impl std::future::Future<Output = Result<T, E>>,
) -> Result<T, E> {
    let msg = msg.into();
    let pb = spinner(&msg);

    match f.await {
        Ok(result) => {
            finish_success(pb, success_msg);
            Ok(result)
        }
        Err(e) => {
            finish_error(pb, format!("{}: {}", msg, e));
            Err(e)
        }
    }
}

pub fn success(msg: impl AsRef<str>) {
    println!("✓ {}", msg.as_ref());
}

pub fn info(msg: impl AsRef<str>) {
    println!("  {}", msg.as_ref());
}

pub fn warn(msg: impl AsRef<str>) {
    eprintln!("! {}", msg.as_ref());
}

pub fn header() -> String {
    let rule = "=".repeat(50);
    format!("{rule}\n    userdb - synthetic user generator\n{rule}")
}

const ID_WIDTH: usize = 8;
const NAME_WIDTH: usize = 20;
const EMAIL_WIDTH: usize = 36;

/// Pad or cut `s` to exactly `width` characters
fn fit(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count <= width {
        format!("{}{}", s, " ".repeat(width - count))
    } else {
        let cut: String = s.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

/// Aligned table of users followed by a result line
pub fn render_users(users: &[User], elapsed: Duration) -> String {
    if users.is_empty() {
        return format!("No users found ({} ms)", elapsed.as_millis());
    }

    let mut out = String::new();
    let head = format!(
        "{} {} {} {}",
        fit("ID", ID_WIDTH),
        fit("First name", NAME_WIDTH),
        fit("Last name", NAME_WIDTH),
        fit("Email", EMAIL_WIDTH)
    );
    out.push_str(head.trim_end());
    out.push('\n');
    out.push_str(&"-".repeat(ID_WIDTH + NAME_WIDTH * 2 + EMAIL_WIDTH + 3));
    out.push('\n');

    for user in users {
        let line = format!(
            "{} {} {} {}",
            fit(&user.id.to_string(), ID_WIDTH),
            fit(&user.first_name, NAME_WIDTH),
            fit(&user.last_name, NAME_WIDTH),
            fit(&user.email, EMAIL_WIDTH)
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(&format!(
        "\n{} user(s) found in {} ms",
        users.len(),
        elapsed.as_millis()
    ));
    out
}

/// Details of one user, or a not-found line
pub fn render_user(user: Option<&User>, id: i32, elapsed: Duration) -> String {
    match user {
        Some(user) => format!(
            "ID:         {}\nFirst name: {}\nLast name:  {}\nEmail:      {}\n\nFound in {} ms",
            user.id,
            user.first_name,
            user.last_name,
            user.email,
            elapsed.as_millis()
        ),
        None => format!("User {} not found ({} ms)", id, elapsed.as_millis()),
    }
}

/// Statistics printed after an insert
#[derive(Debug, Clone, Serialize)]
pub struct InsertStats {
    pub inserted: u64,
    pub strategy: &'static str,
    pub elapsed_ms: u128,
    pub users_per_sec: f64,
    pub total_users: i64,
}

impl InsertStats {
    pub fn new(inserted: u64, strategy: &'static str, elapsed: Duration, total_users: i64) -> Self {
        let secs = elapsed.as_secs_f64();
        let users_per_sec = if secs > 0.0 {
            inserted as f64 / secs
        } else {
            0.0
        };
        Self {
            inserted,
            strategy,
            elapsed_ms: elapsed.as_millis(),
            users_per_sec,
            total_users,
        }
    }

    pub fn render(&self) -> String {
        format!(
            "Inserted {} users ({})\nElapsed:     {} ms\nThroughput:  {:.2} users/sec\nTotal users: {}",
            self.inserted, self.strategy, self.elapsed_ms, self.users_per_sec, self.total_users
        )
    }
}

/// Pretty JSON for `--json` output
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
