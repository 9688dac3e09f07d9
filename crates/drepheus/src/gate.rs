//! Password gate in front of the invite link.

use std::time::{Duration, Instant};

/// Result of submitting the current input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Correct password; carries the link to follow.
    Granted(String),
    Denied,
}

/// Holds the typed password and the "ACCESS DENIED" window.
#[derive(Debug, Clone)]
pub struct PasswordGate {
    password: String,
    invite_url: String,
    denied_for: Duration,
    input: String,
    denied_until: Option<Instant>,
}

impl PasswordGate {
    pub fn new(password: String, invite_url: String, denied_for: Duration) -> Self {
        Self {
            password,
            invite_url,
            denied_for,
            input: String::new(),
            denied_until: None,
        }
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop(&mut self) {
        self.input.pop();
    }

    /// Number of typed characters, for the masked field.
    pub fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Forget the input and any pending denial.
    pub fn reset(&mut self) {
        self.input.clear();
        self.denied_until = None;
    }

    /// Compare the typed input with the password.
    pub fn submit(&mut self, now: Instant) -> GateOutcome {
        if self.input == self.password {
            tracing::info!("access granted");
            self.reset();
            GateOutcome::Granted(self.invite_url.clone())
        } else {
            tracing::info!("access denied");
            self.denied_until = Some(now + self.denied_for);
            GateOutcome::Denied
        }
    }

    /// Whether "ACCESS DENIED" is showing at `now`.
    pub fn is_denied(&self, now: Instant) -> bool {
        self.denied_until.is_some_and(|until| now < until)
    }

    /// Close a lapsed denial window, clearing the input.
    /// Returns `true` if a window was closed.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.denied_until {
            Some(until) if now >= until => {
                self.reset();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> PasswordGate {
        PasswordGate::new(
            "10".to_string(),
            "https://discord.gg/ffRr5JxNyf".to_string(),
            Duration::from_secs(2),
        )
    }

    fn type_in(gate: &mut PasswordGate, text: &str) {
        text.chars().for_each(|c| gate.push(c));
    }

    #[test]
    fn test_correct_password_grants() {
        let mut gate = gate();
        type_in(&mut gate, "10");
        assert_eq!(
            gate.submit(Instant::now()),
            GateOutcome::Granted("https://discord.gg/ffRr5JxNyf".to_string())
        );
        assert_eq!(gate.input_len(), 0);
    }

    #[test]
    fn test_wrong_password_denies_for_two_seconds() {
        let mut gate = gate();
        let start = Instant::now();
        type_in(&mut gate, "100");
        assert_eq!(gate.submit(start), GateOutcome::Denied);

        assert!(gate.is_denied(start));
        assert!(gate.is_denied(start + Duration::from_millis(1999)));
        assert!(!gate.expire(start + Duration::from_millis(1999)));
        assert_eq!(gate.input_len(), 3);

        assert!(!gate.is_denied(start + Duration::from_secs(2)));
        assert!(gate.expire(start + Duration::from_secs(2)));
        assert_eq!(gate.input_len(), 0);
        assert!(!gate.expire(start + Duration::from_secs(3)));
    }

    #[test]
    fn test_exact_match_only() {
        let mut gate = gate();
        type_in(&mut gate, " 10");
        assert_eq!(gate.submit(Instant::now()), GateOutcome::Denied);
    }

    #[test]
    fn test_backspace_edits_input() {
        let mut gate = gate();
        type_in(&mut gate, "19");
        gate.pop();
        gate.push('0');
        assert!(matches!(gate.submit(Instant::now()), GateOutcome::Granted(_)));
        gate.pop();
        assert_eq!(gate.input_len(), 0);
    }
}
