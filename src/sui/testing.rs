// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 SuiSoul Project

//! Fake fullnode for tests: serves canned JSON-RPC responses from a closure
//! on an ephemeral local port.

use axum::{routing::post, Json, Router};
use serde_json::{json, Value};

pub(crate) async fn spawn_node<F>(respond: F) -> String
where
    F: Fn(&str, &Value) -> Value + Clone + Send + Sync + 'static,
{
    let app = Router::new().route(
        "/",
        post(move |Json(request): Json<Value>| {
            let respond = respond.clone();
            async move {
                let method = request
                    .get("method")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let params = request.get("params").cloned().unwrap_or(Value::Null);
                Json(respond(&method, &params))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test node");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test node");
    });
    format!("http://{addr}")
}

pub(crate) fn rpc_result(result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": 1, "result": result })
}
