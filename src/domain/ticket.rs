use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{SanitizedText, TypeConstraintError};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Closed,
}

impl TicketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for TicketStatus {
    type Error = TypeConstraintError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl TicketPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for TicketPriority {
    type Error = TypeConstraintError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Ticket {
    pub id: i32,
    pub org_id: i32,
    pub customer_id: i32,
    pub subject: String,
    pub body: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    /// Email of the agent the ticket is assigned to.
    pub assigned_to: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewTicket {
    pub org_id: i32,
    pub customer_id: i32,
    pub subject: String,
    pub body: String,
    pub priority: TicketPriority,
    pub assigned_to: Option<String>,
}

impl NewTicket {
    /// Builds a ticket with a sanitized body; ticket text is rendered back
    /// into HTML pages and must not carry markup through.
    pub fn new(
        org_id: i32,
        customer_id: i32,
        subject: String,
        body: String,
        priority: TicketPriority,
        assigned_to: Option<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            org_id,
            customer_id,
            subject: SanitizedText::new(subject)?.into_inner(),
            body: SanitizedText::new(body)?.into_inner(),
            priority,
            assigned_to: assigned_to
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty()),
        })
    }
}
