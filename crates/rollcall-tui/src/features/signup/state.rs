use crate::common::TextField;

/// The "register a student" form.
#[derive(Debug, Default)]
pub struct SignupForm {
    selected: Option<String>,
    pub email: TextField,
    /// Inline validation message.
    pub error: Option<String>,
}

impl SignupForm {
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Keeps the current choice only if the new option list still has it.
    pub fn sync_options(&mut self, options: &[String]) {
        if self
            .selected
            .as_ref()
            .is_some_and(|name| !options.contains(name))
        {
            self.selected = None;
        }
    }

    /// Moves the activity choice through `options`, wrapping at either end.
    pub fn cycle(&mut self, options: &[String], forward: bool) {
        if options.is_empty() {
            self.selected = None;
            return;
        }
        let len = options.len();
        let current = self
            .selected
            .as_ref()
            .and_then(|name| options.iter().position(|o| o == name));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.selected = Some(options[next].clone());
        self.error = None;
    }

    /// Clears the email after a successful signup.
    pub fn reset_input(&mut self) {
        self.email.clear();
        self.error = None;
    }
}
