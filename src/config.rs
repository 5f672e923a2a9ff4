use std::path::PathBuf;

use clap::Parser;

/// breach-check-rs — checks an email/password pair against a breach wordlist and mails the result.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "breach-check-rs",
    version,
    about = "Checks an email/password pair against a breach wordlist and mails the result.",
    long_about = None
)]
pub struct Config {
    /// Address the HTTP server listens on.
    #[arg(long, default_value = "127.0.0.1:5000")]
    pub bind: String,

    /// Newline-delimited breach wordlist, read once at startup.
    #[arg(long, default_value = "rockyou_subset.txt")]
    pub wordlist: PathBuf,

    /// From address used on outbound notifications.
    #[arg(long, default_value = "alerts@localhost")]
    pub sender: String,

    /// Operator address that receives a copy of every breach alert (optional).
    #[arg(long = "operator-email")]
    pub operator_email: Option<String>,

    /// Seconds an outcome notification may take before it is abandoned.
    #[arg(long = "notify-timeout-secs", default_value_t = 30)]
    pub notify_timeout_secs: u64,

    /// Directory with the static polling UI (optional).
    #[arg(long = "ui-dir")]
    pub ui_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::parse_from(["breach-check-rs"]);
        assert_eq!(cfg.bind, "127.0.0.1:5000");
        assert_eq!(cfg.wordlist, PathBuf::from("rockyou_subset.txt"));
        assert!(cfg.operator_email.is_none());
        assert!(cfg.ui_dir.is_none());
        assert_eq!(cfg.notify_timeout_secs, 30);
    }

    #[test]
    fn overrides() {
        let cfg = Config::parse_from([
            "breach-check-rs",
            "--bind",
            "0.0.0.0:8080",
            "--operator-email",
            "ops@example.com",
            "--ui-dir",
            "static",
        ]);
        assert_eq!(cfg.bind, "0.0.0.0:8080");
        assert_eq!(cfg.operator_email.as_deref(), Some("ops@example.com"));
        assert_eq!(cfg.ui_dir, Some(PathBuf::from("static")));
    }
}
