use serde_json::Value;

use crate::task::{
  CreateTaskBody,
  LIST_PAGE_SIZE,
  NewTask,
  StatusFilter,
  TaskPatch
};

pub const DEFAULT_API_BASE_URL: &str =
  "http://localhost:8000";

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  thiserror::Error,
)]
pub enum RequestError {
  #[error(
    "server responded with status \
     {0}"
  )]
  Status(u16),
  #[error("{0}")]
  Transport(String),
  #[error("{0}")]
  Decode(String),
  #[error("{0}")]
  Encode(String)
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Method {
  Get,
  Post,
  Put,
  Delete
}

impl Method {
  pub fn as_str(self) -> &'static str {
    match self {
      | Method::Get => "GET",
      | Method::Post => "POST",
      | Method::Put => "PUT",
      | Method::Delete => "DELETE"
    }
  }
}

/// A fully resolved call against the
/// `/items` resource. The UI executes
/// these; nothing here touches the
/// network.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
  pub method: Method,
  pub url:    String,
  pub body:   Option<Value>
}

impl ApiRequest {
  pub fn list(
    base: &str,
    filter: StatusFilter
  ) -> Self {
    let url = match filter.status() {
      | Some(status) => {
        format!(
          "{base}/items?status={status}&limit={LIST_PAGE_SIZE}"
        )
      }
      | None => {
        format!(
          "{base}/items?limit={LIST_PAGE_SIZE}"
        )
      }
    };
    Self {
      method: Method::Get,
      url,
      body: None
    }
  }

  pub fn create(
    base: &str,
    task: NewTask
  ) -> Result<Self, RequestError> {
    let body = encode(
      &CreateTaskBody::from(task)
    )?;
    Ok(Self {
      method: Method::Post,
      url:    format!("{base}/items"),
      body:   Some(body)
    })
  }

  pub fn update(
    base: &str,
    id: &str,
    patch: &TaskPatch
  ) -> Result<Self, RequestError> {
    Ok(Self {
      method: Method::Put,
      url:    format!(
        "{base}/items/{id}"
      ),
      body:   Some(encode(patch)?)
    })
  }

  pub fn delete(
    base: &str,
    id: &str
  ) -> Self {
    Self {
      method: Method::Delete,
      url:    format!(
        "{base}/items/{id}"
      ),
      body:   None
    }
  }
}

/// Picks the configured base URL when
/// present and non-blank, otherwise
/// the local default. Trailing slashes
/// are dropped so paths join cleanly.
pub fn resolve_base_url(
  configured: Option<&str>
) -> String {
  let raw = configured
    .map(str::trim)
    .filter(|value| !value.is_empty())
    .unwrap_or(DEFAULT_API_BASE_URL);
  raw.trim_end_matches('/').to_string()
}

fn encode<T: serde::Serialize>(
  value: &T
) -> Result<Value, RequestError> {
  serde_json::to_value(value).map_err(
    |err| {
      RequestError::Encode(
        err.to_string()
      )
    }
  )
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::task::TaskStatus;

  const BASE: &str =
    "http://api.test";

  #[test]
  fn list_for_all_has_no_status_param(
  ) {
    let req = ApiRequest::list(
      BASE,
      StatusFilter::All
    );
    assert_eq!(req.method, Method::Get);
    assert_eq!(
      req.url,
      "http://api.test/items?limit=100"
    );
    assert!(!req.url.contains("status"));
    assert!(req.body.is_none());
  }

  #[test]
  fn list_for_status_scopes_query() {
    let req = ApiRequest::list(
      BASE,
      StatusFilter::InProgress
    );
    assert_eq!(
      req.url,
      "http://api.test/items?status=in_progress&limit=100"
    );
  }

  #[test]
  fn create_posts_todo_status() {
    let req = ApiRequest::create(
      BASE,
      NewTask {
        title:       "Write spec"
          .to_string(),
        description: String::new(),
        priority:    3,
        due_date:    String::new()
      }
    )
    .expect("build create");
    assert_eq!(
      req.method,
      Method::Post
    );
    assert_eq!(
      req.url,
      "http://api.test/items"
    );
    let body =
      req.body.expect("create body");
    assert_eq!(body["status"], "todo");
    assert_eq!(
      body["title"],
      "Write spec"
    );
    assert_eq!(body["priority"], 3);
  }

  #[test]
  fn status_change_puts_only_status() {
    let req = ApiRequest::update(
      BASE,
      "abc",
      &TaskPatch::status(
        TaskStatus::Done
      )
    )
    .expect("build update");
    assert_eq!(req.method, Method::Put);
    assert_eq!(
      req.url,
      "http://api.test/items/abc"
    );
    assert_eq!(
      req.body,
      Some(json!({ "status": "done" }))
    );
  }

  #[test]
  fn delete_has_no_body() {
    let req =
      ApiRequest::delete(BASE, "abc");
    assert_eq!(
      req.method,
      Method::Delete
    );
    assert_eq!(
      req.url,
      "http://api.test/items/abc"
    );
    assert!(req.body.is_none());
  }

  #[test]
  fn base_url_falls_back_and_trims() {
    assert_eq!(
      resolve_base_url(None),
      DEFAULT_API_BASE_URL
    );
    assert_eq!(
      resolve_base_url(Some("  ")),
      DEFAULT_API_BASE_URL
    );
    assert_eq!(
      resolve_base_url(Some(
        "https://tasks.example.com/api/"
      )),
      "https://tasks.example.com/api"
    );
  }
}
