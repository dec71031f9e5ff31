//! Prompt builders for the college search
//!
//! The primary prompt asks for a larger, fully described list. The fallback prompt is
//! shorter and terser so a model that truncated or mangled the first answer has a better
//! chance of returning something usable.

/// Which prompt of the escalation produced a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Primary,
    Fallback,
}

impl PromptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::Primary => "primary",
            PromptKind::Fallback => "fallback",
        }
    }
}

/// Settings shared by both prompts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSettings {
    pub primary_count: usize,
    pub fallback_count: usize,
    pub max_response_chars: usize,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            primary_count: 12,
            fallback_count: 8,
            max_response_chars: 4000,
        }
    }
}

impl PromptSettings {
    pub fn build(&self, kind: PromptKind, location: &str) -> String {
        match kind {
            PromptKind::Primary => self.primary(location),
            PromptKind::Fallback => self.fallback(location),
        }
    }

    pub fn primary(&self, location: &str) -> String {
        format!(
            r#"List exactly {count} top colleges/universities in {location}, India offering IT or Management courses.

Return ONLY valid JSON array:
[
  {{
    "name": "College Name",
    "address": "Full Address",
    "contactDetails": {{"phone": "+91-xxx", "email": "college@edu.in", "website": "https://college.edu"}},
    "coursesAvailable": ["B.Tech CSE", "MBA"],
    "fees": [{{"course": "B.Tech CSE", "amount": "200000"}}],
    "type": "Both"
  }}
]

Include: IITs, NITs, government colleges, private universities, management institutes.
Keep response under {max_chars} characters to avoid truncation."#,
            count = self.primary_count,
            location = location,
            max_chars = self.max_response_chars,
        )
    }

    pub fn fallback(&self, location: &str) -> String {
        format!(
            r#"List {count} major IT/Management colleges in {location}, India.

Return JSON array:
[{{"name":"College","address":"Address","contactDetails":{{"phone":"+91-xxx","email":"email","website":"url"}},"coursesAvailable":["B.Tech","MBA"],"fees":[{{"course":"B.Tech","amount":"150000"}}],"type":"Both"}}]

Keep response brief."#,
            count = self.fallback_count,
            location = location,
        )
    }
}
