use std::fmt;

use serde::{Deserialize, Serialize};

/// The persona a message is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person at the keyboard.
    Student,
    /// Feedback from the professor advisor.
    Professor,
    /// Feedback from the research advisor.
    Research,
    /// Analysis produced by the service itself.
    System,
}

impl Role {
    /// Returns the display style for this persona.
    pub fn style(&self) -> RoleStyle {
        match self {
            Role::Student => RoleStyle {
                label: "Student",
                ansi: "\x1b[32m",
            },
            Role::Professor => RoleStyle {
                label: "Professor",
                ansi: "\x1b[35m",
            },
            Role::Research => RoleStyle {
                label: "Research Advisor",
                ansi: "\x1b[36m",
            },
            Role::System => RoleStyle {
                label: "System",
                ansi: "\x1b[33m",
            },
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Professor => write!(f, "professor"),
            Role::Research => write!(f, "research"),
            Role::System => write!(f, "system"),
        }
    }
}

/// Display tokens for a persona.  Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleStyle {
    /// Name printed in front of the message.
    pub label: &'static str,
    /// ANSI escape used when colors are enabled.
    pub ansi: &'static str,
}

/// Which side of the conversation a message sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Replies from the service.
    Left,
    /// The user's own messages.
    Right,
}

/// A single rendered chat message.
///
/// Messages are transient: they are created, handed to a renderer, and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Text of the message.
    pub content: String,
    /// Side of the conversation.
    pub position: Position,
    /// Persona the message is rendered as.
    pub role: Role,
}

impl Message {
    /// Create a new message.
    pub fn new(content: impl Into<String>, position: Position, role: Role) -> Self {
        Self {
            content: content.into(),
            position,
            role,
        }
    }

    /// A right-aligned message typed by the user.
    pub fn student(content: impl Into<String>) -> Self {
        Self::new(content, Position::Right, Role::Student)
    }

    /// A left-aligned reply in the given persona.
    pub fn reply(content: impl Into<String>, role: Role) -> Self {
        Self::new(content, Position::Left, role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_messages_are_right_aligned() {
        let msg = Message::student("Study X");
        assert_eq!(msg.position, Position::Right);
        assert_eq!(msg.role, Role::Student);
        assert_eq!(msg.content, "Study X");
    }

    #[test]
    fn replies_are_left_aligned() {
        let msg = Message::reply("keep going", Role::Professor);
        assert_eq!(msg.position, Position::Left);
        assert_eq!(msg.role, Role::Professor);
    }

    #[test]
    fn every_role_has_a_distinct_style() {
        let roles = [Role::Student, Role::Professor, Role::Research, Role::System];
        for (i, a) in roles.iter().enumerate() {
            for b in &roles[i + 1..] {
                assert_ne!(a.style(), b.style());
            }
        }
    }
}
