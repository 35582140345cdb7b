#![deny(missing_docs)]
//! dpdpscan server executable.
//!
//! Hosts the HTTP endpoints for repository compliance scans.

mod acquire;
mod openapi;
mod routes;

#[cfg(not(test))]
use actix_cors::Cors;
#[cfg(not(test))]
use actix_web::{App, HttpServer, web};
#[cfg(not(test))]
use dotenvy::dotenv;

#[allow(unused_imports)]
use std::str::FromStr;
#[cfg(not(test))]
use std::sync::Arc;

#[cfg(not(test))]
use crate::acquire::HttpRawHost;
#[cfg(not(test))]
use crate::routes::{AppState, health, openapi_json, scan};

#[cfg(not(test))]
fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Initialize the blocking client synchronously before the async runtime
    // starts. This prevents the panic caused by creating a
    // `reqwest::blocking::Client` inside the Actix runtime.
    let raw_host = HttpRawHost::from_env();

    let state = web::Data::new(AppState {
        raw_host: Arc::new(raw_host),
    });

    let listen_addr = std::env::var("DPDPSCAN_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let listen_port =
        u16::from_str(&std::env::var("DPDPSCAN_PORT").unwrap_or_else(|_| "8000".to_string()))
            .expect("DPDPSCAN_PORT must be a u16 number");
    let err_msg = format!("Can't bind {}:{}", &listen_addr, listen_port);

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            // The scan API is open to any origin.
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();
            App::new()
                .wrap(actix_web::middleware::Logger::default())
                .wrap(cors)
                .app_data(state.clone())
                .service(health)
                .service(scan)
                .service(openapi_json)
        })
        .bind((listen_addr, listen_port))
        .expect(&err_msg)
        .run()
        .await
    })
}

#[cfg(test)]
fn main() {}
