use serde::Serialize;
use std::fmt;

/// Outcome codes reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    Unauthorized,
    NamespaceDoesNotExist,
    NamespaceAlreadyExists,
    InvalidStatementType,
    InternalServerError,
    CreateNamespaceError,
    DropNamespaceError,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Unauthorized => "Unauthorized",
            Status::NamespaceDoesNotExist => "NamespaceDoesNotExist",
            Status::NamespaceAlreadyExists => "NamespaceAlreadyExists",
            Status::InvalidStatementType => "InvalidStatementType",
            Status::InternalServerError => "InternalServerError",
            Status::CreateNamespaceError => "CreateNamespaceError",
            Status::DropNamespaceError => "DropNamespaceError",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single reply produced for one statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub status: Status,
    pub message: String,
    /// False when the statement was refused or failed
    pub success: bool,
    /// Result listing, one entry per line when rendered
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<String>,
}

impl Response {
    pub fn success<S: Into<String>>(status: Status, message: S) -> Self {
        Self {
            status,
            message: message.into(),
            success: true,
            rows: Vec::new(),
        }
    }

    pub fn failure<S: Into<String>>(status: Status, message: S) -> Self {
        Self {
            status,
            message: message.into(),
            success: false,
            rows: Vec::new(),
        }
    }

    pub fn ok() -> Self {
        Self::success(Status::Ok, "")
    }

    /// A successful listing
    pub fn rows(rows: Vec<String>) -> Self {
        Self {
            rows,
            ..Self::ok()
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        for row in &self.rows {
            write!(f, "\n{}", row)?;
        }
        Ok(())
    }
}

/// Where the executor delivers its response
pub trait ResponseSink {
    fn send(&mut self, response: Response);
}

impl ResponseSink for Vec<Response> {
    fn send(&mut self, response: Response) {
        self.push(response);
    }
}
