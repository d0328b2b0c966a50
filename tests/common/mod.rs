#![allow(dead_code)]

use std::{net::SocketAddr, str::FromStr, sync::Arc};

use car_rental::{
    config::AppConfig,
    database,
    dto::vehicle_dto::NewVehicle,
    models::vehicle::Vehicle,
    repositories::SqliteStore,
    state::AppState,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

pub struct TestApp {
    pub addr: SocketAddr,
    pub state: AppState,
}

pub async fn spawn_app() -> TestApp {
    let pool = database::connect("sqlite::memory:").await.unwrap();
    database::run_migrations(&pool).await.unwrap();
    let store = Arc::new(SqliteStore::new(Arc::new(pool)));
    let state = AppState::with_defaults(store, &AppConfig::default());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = car_rental::app(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp { addr, state }
}

impl TestApp {
    pub async fn add_vehicle(&self, name: &str, price: &str, available: bool) -> Vehicle {
        self.state
            .catalog
            .add_vehicle(NewVehicle {
                name: name.into(),
                make: "Toyota".into(),
                model_year: 2023,
                seats: 5,
                location: "Negombo".into(),
                price_per_day: Decimal::from_str(price).unwrap(),
                description: String::new(),
                main_image: Some("cars/main.jpg".into()),
                available,
                images: vec!["cars/side.jpg".into(), "cars/interior.jpg".into()],
            })
            .await
            .unwrap()
            .vehicle
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        send_raw(self.addr, "GET", path, &[], None).await
    }

    pub async fn get_as(&self, path: &str, email: &str) -> TestResponse {
        send_raw(self.addr, "GET", path, &[("x-user-email", email)], None).await
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, form_encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        send_raw(
            self.addr,
            "POST",
            path,
            &[("content-type", "application/x-www-form-urlencoded")],
            Some(body.as_bytes()),
        )
        .await
    }
}

fn form_encode(value: &str) -> String {
    let mut out = String::new();
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: u16,
    pub head: String,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<String> {
        let prefix = format!("{}:", name.to_ascii_lowercase());
        self.head.lines().find_map(|line| {
            line.to_ascii_lowercase()
                .starts_with(&prefix)
                .then(|| line[prefix.len()..].trim().to_string())
        })
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&[u8]>,
) -> TestResponse {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let body = body.unwrap_or_default();

    let mut request = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\nContent-Length: {}\r\n",
        body.len()
    );
    for (name, value) in headers {
        request.push_str(&format!("{name}: {value}\r\n"));
    }
    request.push_str("\r\n");

    stream.write_all(request.as_bytes()).await.unwrap();
    stream.write_all(body).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();

    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has a header block");
    let head = String::from_utf8_lossy(&raw[..split]).to_string();
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .expect("status line");
    let mut body = raw[split + 4..].to_vec();
    if head
        .to_ascii_lowercase()
        .contains("transfer-encoding: chunked")
    {
        body = dechunk(&body);
    }

    TestResponse { status, head, body }
}

fn dechunk(mut data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        let Some(line_end) = data.windows(2).position(|w| w == b"\r\n") else {
            break;
        };
        let size_line = String::from_utf8_lossy(&data[..line_end]).to_string();
        let size = usize::from_str_radix(size_line.split(';').next().unwrap_or("0").trim(), 16)
            .unwrap_or(0);
        data = &data[line_end + 2..];
        if size == 0 || data.len() < size {
            break;
        }
        out.extend_from_slice(&data[..size]);
        data = &data[(size + 2).min(data.len())..];
    }
    out
}
