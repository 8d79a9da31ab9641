// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use leaves::LedgerConfig;
use leaves_domain::{Role, format_date};
use leaves_persistence::{NewEmployee, Persistence, PersistenceError};
use serde_json::{Value, json};
use std::sync::Arc;
use time::macros::date;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::identity::{EMPLOYEE_ID_HEADER, EMPLOYEE_ROLE_HEADER};
use crate::{AppState, build_router};

/// A router over a seeded in-memory store with one admin and one
/// registered employee.
pub struct TestApp {
    pub router: Router,
    pub admin_id: i64,
    pub employee_id: i64,
}

impl TestApp {
    pub async fn setup() -> Self {
        let mut persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        leaves_api::seed_reference_data(&mut persistence).unwrap();
        let admin_id: i64 = persistence
            .transaction(|tx| -> Result<i64, PersistenceError> {
                tx.insert_employee(&NewEmployee {
                    name: String::from("Grace Hopper"),
                    email: String::from("grace@example.com"),
                    department: None,
                    join_date: date!(2020 - 01 - 06),
                    role: Role::Admin,
                })
            })
            .unwrap();

        let router: Router = build_router(AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            config: LedgerConfig::default(),
        });

        let (status, body) = send(
            &router,
            "POST",
            "/employees",
            Some((admin_id, "admin")),
            Some(json!({
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "department": "Engineering"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        let employee_id: i64 = body["employee_id"].as_i64().unwrap();

        Self {
            router,
            admin_id,
            employee_id,
        }
    }

    pub async fn as_admin(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send(&self.router, method, uri, Some((self.admin_id, "admin")), body).await
    }

    pub async fn as_employee(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        send(&self.router, method, uri, Some((self.employee_id, "employee")), body).await
    }

    /// Looks up a leave type ID by name.
    pub async fn leave_type_id(&self, name: &str) -> i64 {
        let (_, summary) = self.as_employee("GET", "/allocations", None).await;
        summary["balances"]
            .as_array()
            .unwrap()
            .iter()
            .find(|b| b["leave_type_name"] == name)
            .unwrap()["leave_type_id"]
            .as_i64()
            .unwrap()
    }
}

/// A date `days` from today, as `YYYY-MM-DD`.
pub fn days_from_today(days: i64) -> String {
    format_date(OffsetDateTime::now_utc().date() + Duration::days(days))
}

pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    caller: Option<(i64, &str)>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((employee_id, role)) = caller {
        builder = builder
            .header(EMPLOYEE_ID_HEADER, employee_id.to_string())
            .header(EMPLOYEE_ROLE_HEADER, role);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}
