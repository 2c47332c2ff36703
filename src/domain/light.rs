// Light state domain model

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightState {
    On,
    Off,
}

impl LightState {
    /// Only the exact string `on` counts as on; anything else is off.
    pub fn from_body(body: &str) -> Self {
        if body == "on" {
            Self::On
        } else {
            Self::Off
        }
    }

    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

/// A status reading as received, keeping the raw text for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightReading {
    pub raw: String,
    pub state: LightState,
}

impl LightReading {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let state = LightState::from_body(&raw);
        Self { raw, state }
    }

    pub fn status_text(&self) -> String {
        format!("it's {}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_exact_on_is_on() {
        assert_eq!(LightState::from_body("on"), LightState::On);
        for body in ["off", "", "unknown", "ON", "on\n", " on"] {
            assert_eq!(LightState::from_body(body), LightState::Off, "{body:?}");
        }
    }

    #[test]
    fn test_status_text_embeds_raw_state() {
        assert_eq!(LightReading::new("on").status_text(), "it's on");
        assert_eq!(LightReading::new("off").status_text(), "it's off");
        assert_eq!(LightReading::new("unknown").status_text(), "it's unknown");
    }
}
