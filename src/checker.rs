use std::sync::Arc;
use std::time::Duration;

use ::time::{format_description::well_known, OffsetDateTime};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::{CheckError, TransportError};
use crate::notifier::Notifier;
use crate::passwords;
use crate::types::{status, MatchKind, Outcome, ScanSnapshot};
use crate::wordlist::Wordlist;

/// Identifies one accepted check. Writes tagged with an older id are dropped.
pub type CheckId = u64;

/// Result of the decision procedure plus how many membership tests it ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub outcome: Outcome,
    pub checked: u64,
}

/// Reverse `s` character by character.
pub fn reverse_email(s: &str) -> String {
    s.chars().rev().collect()
}

/// Ordered decision procedure for a single check.
///
/// 1. a supplied password found in the wordlist
/// 2. a supplied password equal to the reversed email
/// 3. with no password and `reversed_mode`, the reversed email found in the wordlist
/// 4. otherwise not found
pub fn evaluate(
    wordlist: &Wordlist,
    email: &str,
    password: Option<&str>,
    reversed_mode: bool,
) -> Verdict {
    let reversed = reverse_email(email);
    match password {
        Some(pw) => {
            if wordlist.contains(pw) {
                return Verdict {
                    outcome: Outcome::Found {
                        value: pw.to_owned(),
                        kind: MatchKind::Dictionary,
                    },
                    checked: 1,
                };
            }
            if pw == reversed {
                return Verdict {
                    outcome: Outcome::Found {
                        value: reversed,
                        kind: MatchKind::ReversedEmail,
                    },
                    checked: 1,
                };
            }
            Verdict {
                outcome: Outcome::NotFound,
                checked: 1,
            }
        }
        None if reversed_mode => {
            let outcome = if wordlist.contains(&reversed) {
                Outcome::Found {
                    value: reversed,
                    kind: MatchKind::ReversedEmail,
                }
            } else {
                Outcome::NotFound
            };
            Verdict {
                outcome,
                checked: 1,
            }
        }
        None => Verdict {
            outcome: Outcome::NotFound,
            checked: 0,
        },
    }
}

#[derive(Debug)]
struct Inner {
    current: CheckId,
    snapshot: ScanSnapshot,
}

/// Owner of the process-wide Scan State.
///
/// Only one check may be running; reset and finalize happen under the write lock.
#[derive(Debug, Clone)]
pub struct ScanCoordinator {
    inner: Arc<RwLock<Inner>>,
}

impl ScanCoordinator {
    pub fn new(total_passwords: u64) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                current: 0,
                snapshot: ScanSnapshot::idle(total_passwords),
            })),
        }
    }

    /// Accept a new check for `email`, or fail with [`CheckError::Conflict`]
    /// leaving the in-flight state untouched.
    pub async fn begin(&self, email: &str) -> Result<CheckId, CheckError> {
        let mut s = self.inner.write().await;
        if s.snapshot.running {
            return Err(CheckError::Conflict);
        }
        s.current += 1;
        let total = s.snapshot.total_passwords;
        s.snapshot = ScanSnapshot {
            running: true,
            status: status::INITIALIZING.into(),
            email: Some(email.to_owned()),
            started_at: Some(now_rfc3339()),
            ..ScanSnapshot::idle(total)
        };
        Ok(s.current)
    }

    /// Apply `f` to the state if `id` is still the current check.
    /// Returns whether the write happened.
    pub async fn update<F>(&self, id: CheckId, f: F) -> bool
    where
        F: FnOnce(&mut ScanSnapshot),
    {
        let mut s = self.inner.write().await;
        if s.current != id {
            return false;
        }
        f(&mut s.snapshot);
        true
    }

    /// Mark check `id` complete. Ignored if a newer check has started.
    pub async fn finalize(&self, id: CheckId) -> bool {
        self.update(id, |snap| {
            snap.running = false;
            snap.progress = 100;
            snap.finished_at = Some(now_rfc3339());
        })
        .await
    }

    /// Clear the running flag for the polling client.
    ///
    /// This does not interrupt a worker that is already executing; it only
    /// resets client-visible state. Safe to call when nothing is running.
    pub async fn stop(&self) {
        let mut s = self.inner.write().await;
        let was_running = s.snapshot.running;
        s.snapshot.running = false;
        s.snapshot.status = status::STOPPED.into();
        if was_running {
            // detach the in-flight worker so its later writes are dropped
            s.current += 1;
            info!("check stopped by user");
        }
    }

    pub async fn snapshot(&self) -> ScanSnapshot {
        self.inner.read().await.snapshot.clone()
    }
}

/// Everything a check worker needs; cheap to clone into a task.
#[derive(Clone)]
pub struct Checker {
    pub wordlist: Arc<Wordlist>,
    pub coordinator: ScanCoordinator,
    pub notifier: Notifier,
    notify_timeout: Duration,
}

/// Upper bound on one outcome notification, operator copy included.
pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(30);

impl Checker {
    pub fn new(wordlist: Arc<Wordlist>, notifier: Notifier) -> Self {
        let coordinator = ScanCoordinator::new(wordlist.len() as u64);
        Self {
            wordlist,
            coordinator,
            notifier,
            notify_timeout: DEFAULT_NOTIFY_TIMEOUT,
        }
    }

    pub fn with_notify_timeout(mut self, timeout: Duration) -> Self {
        self.notify_timeout = timeout;
        self
    }

    /// Validate the request, reset state and launch the worker in the background.
    ///
    /// An empty password is treated as absent. The returned handle is only
    /// useful to tests; callers normally drop it.
    pub async fn start(
        &self,
        email: Option<&str>,
        password: Option<&str>,
        reversed_mode: bool,
    ) -> Result<JoinHandle<()>, CheckError> {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| CheckError::Validation("Email is required".into()))?
            .to_owned();
        let password = password.filter(|p| !p.is_empty()).map(str::to_owned);

        let id = self.coordinator.begin(&email).await?;
        info!(check = id, %email, with_password = password.is_some(), reversed_mode, "check accepted");

        let worker = self.clone();
        Ok(tokio::spawn(async move {
            worker.run(id, &email, password.as_deref(), reversed_mode).await;
        }))
    }

    /// Body of the background worker. Always finalizes and always attempts
    /// exactly one user notification.
    pub async fn run(&self, id: CheckId, email: &str, password: Option<&str>, reversed_mode: bool) {
        let suggestions = passwords::generate_default();
        let published = suggestions.clone();
        self.coordinator
            .update(id, move |snap| {
                snap.status = status::CHECKING.into();
                snap.generated_passwords = published;
            })
            .await;

        let verdict = evaluate(&self.wordlist, email, password, reversed_mode);
        info!(check = id, found = verdict.outcome.is_found(), "check evaluated");

        let outcome = verdict.outcome.clone();
        self.coordinator
            .update(id, move |snap| {
                snap.checked_count = verdict.checked;
                snap.status = outcome.status_text().into();
                if let Outcome::Found { value, kind } = outcome {
                    snap.found_password = Some(value);
                    snap.match_kind = Some(kind);
                }
            })
            .await;

        let sent = tokio::time::timeout(
            self.notify_timeout,
            self.notifier.notify(email, &verdict.outcome, &suggestions),
        )
        .await
        .unwrap_or(Err(TransportError::TimedOut(self.notify_timeout)));
        if let Err(e) = sent {
            warn!(check = id, %email, error = %e, "notification failed");
        }

        self.coordinator.finalize(id).await;
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}
