//! Fixed-length OTP buffer and its input reducer. Keyboard and paste events
//! become [`OtpEvent`]s; [`OtpInput::reduce`] maps the current buffer and an
//! event to the next buffer, including which slot should hold focus.

use regex::Regex;

/// Number of digits in a code.
pub const OTP_LENGTH: usize = 6;
const LAST_SLOT: usize = OTP_LENGTH - 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OtpEvent {
    /// New value of the input at `index`, as reported by the browser.
    Input { index: usize, value: String },
    /// Backspace pressed while slot `index` had focus.
    Backspace { index: usize },
    /// Clipboard text pasted into the code inputs.
    Paste(String),
    /// Empty every slot and focus the first one.
    Reset,
}

/// Six slots, each empty or a single ASCII digit, plus the focused slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OtpInput {
    digits: [Option<char>; OTP_LENGTH],
    focus: usize,
}

/// Whether `value` is an acceptable single-slot value: empty or one digit.
#[must_use]
pub fn is_slot_value(value: &str) -> bool {
    Regex::new(r"^[0-9]?$").is_ok_and(|re| re.is_match(value))
}

impl OtpInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn focus(&self) -> usize {
        self.focus
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<char> {
        self.digits.get(index).copied().flatten()
    }

    /// Slot values as strings, empty for unfilled slots.
    #[must_use]
    pub fn slots(&self) -> [String; OTP_LENGTH] {
        self.digits
            .map(|digit| digit.map(String::from).unwrap_or_default())
    }

    #[must_use]
    pub fn filled(&self) -> usize {
        self.digits.iter().filter(|digit| digit.is_some()).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.filled() == OTP_LENGTH
    }

    /// The concatenated code, only once every slot is filled.
    #[must_use]
    pub fn code(&self) -> Option<String> {
        if self.is_complete() {
            Some(self.digits.iter().flatten().collect())
        } else {
            None
        }
    }

    /// Pure transition: the buffer after `event`. Rejected input returns an
    /// unchanged copy.
    #[must_use]
    pub fn reduce(&self, event: &OtpEvent) -> Self {
        let mut next = self.clone();
        next.apply(event);
        next
    }

    /// Applies `event` in place and reports whether any slot changed.
    pub fn apply(&mut self, event: &OtpEvent) -> bool {
        match event {
            OtpEvent::Input { index, value } => self.input(*index, value),
            OtpEvent::Backspace { index } => {
                self.backspace(*index);
                false
            }
            OtpEvent::Paste(text) => self.paste(text),
            OtpEvent::Reset => {
                let changed = self.filled() > 0;
                *self = Self::default();
                changed
            }
        }
    }

    fn input(&mut self, index: usize, value: &str) -> bool {
        if index >= OTP_LENGTH || !is_slot_value(value) {
            return false;
        }

        let digit = value.chars().next();
        let changed = self.digits[index] != digit;
        self.digits[index] = digit;
        self.focus = if digit.is_some() && index < LAST_SLOT {
            index + 1
        } else {
            index
        };
        changed
    }

    fn backspace(&mut self, index: usize) {
        if index >= OTP_LENGTH {
            return;
        }
        // the browser clears a filled slot itself; only an empty slot moves back
        self.focus = if self.digits[index].is_none() && index > 0 {
            index - 1
        } else {
            index
        };
    }

    fn paste(&mut self, text: &str) -> bool {
        let pasted: Vec<char> = text
            .chars()
            .filter(char::is_ascii_digit)
            .take(OTP_LENGTH)
            .collect();

        let mut changed = false;
        for (slot, digit) in self.digits.iter_mut().zip(pasted) {
            changed |= *slot != Some(digit);
            *slot = Some(digit);
        }

        self.focus = self
            .digits
            .iter()
            .position(Option::is_none)
            .unwrap_or(LAST_SLOT);
        changed
    }
}
