//! User settings: user type, optional disability focus and the active system prompt.

use prompt::{
    ADHD_TEMPLATE, ASD_TEMPLATE, DEFAULT_SYSTEM_PROMPT, DYSLEXIA_TEMPLATE, SPEECH_DELAY_TEMPLATE,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UserType {
    #[default]
    Regular,
    #[serde(rename = "Specially Abled")]
    SpeciallyAbled,
    Personalized,
}

impl UserType {
    pub const ALL: [UserType; 3] = [
        UserType::Regular,
        UserType::SpeciallyAbled,
        UserType::Personalized,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Regular => "Regular",
            UserType::SpeciallyAbled => "Specially Abled",
            UserType::Personalized => "Personalized",
        }
    }

    /// Whether the user may edit the system prompt by hand.
    pub fn allows_custom_prompt(&self) -> bool {
        !matches!(self, UserType::Regular)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "regular" => Ok(UserType::Regular),
            "specially abled" => Ok(UserType::SpeciallyAbled),
            "personalized" => Ok(UserType::Personalized),
            _ => Err(format!(
                "unknown user type {:?} (expected Regular, Specially Abled or Personalized)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisabilityType {
    #[serde(rename = "Autism Spectrum Disorder (ASD)")]
    Autism,
    #[serde(rename = "ADHD")]
    Adhd,
    Dyslexia,
    #[serde(rename = "Speech_Delay")]
    SpeechDelay,
}

impl DisabilityType {
    pub const ALL: [DisabilityType; 4] = [
        DisabilityType::Autism,
        DisabilityType::Adhd,
        DisabilityType::Dyslexia,
        DisabilityType::SpeechDelay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisabilityType::Autism => "Autism Spectrum Disorder (ASD)",
            DisabilityType::Adhd => "ADHD",
            DisabilityType::Dyslexia => "Dyslexia",
            DisabilityType::SpeechDelay => "Speech_Delay",
        }
    }

    /// System prompt specialised for caregivers of people with this condition.
    pub fn template(&self) -> &'static str {
        match self {
            DisabilityType::Autism => ASD_TEMPLATE,
            DisabilityType::Adhd => ADHD_TEMPLATE,
            DisabilityType::Dyslexia => DYSLEXIA_TEMPLATE,
            DisabilityType::SpeechDelay => SPEECH_DELAY_TEMPLATE,
        }
    }
}

impl fmt::Display for DisabilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisabilityType {
    type Err = String;

    /// Accepts the stored name or a short alias (`asd`, `autism`, `adhd`, `dyslexia`, `speech-delay`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(d) = Self::ALL.iter().find(|d| d.as_str().eq_ignore_ascii_case(s.trim())) {
            return Ok(*d);
        }
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "asd" | "autism" => Ok(DisabilityType::Autism),
            "adhd" => Ok(DisabilityType::Adhd),
            "dyslexia" => Ok(DisabilityType::Dyslexia),
            "speech_delay" | "speech" => Ok(DisabilityType::SpeechDelay),
            _ => Err(format!("unknown disability type {:?}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default)]
    pub disability_type: Option<DisabilityType>,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_type: UserType::Regular,
            disability_type: None,
            system_prompt: default_system_prompt(),
        }
    }
}
