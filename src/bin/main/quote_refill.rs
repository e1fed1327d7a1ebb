//! Quote fetch performed on the controller's behalf.
//!
//! The controller only raises a fetch-pending flag; this module owns the
//! actual HTTP round trip to the quote proxy and hands back one
//! [`FetchOutcome`] per cycle.

use core::fmt::Write as _;

use embassy_net::{IpAddress, Stack, dns::DnsQueryType, tcp::TcpSocket};
use embassy_time::{Duration, WithTimeout};
use glance_core::{app::FetchOutcome, quote::FetchError, wire};
use heapless::{String, Vec};
use log::debug;

/// Plain-HTTP quote proxy on the local network. The proxy terminates TLS
/// toward the upstream quote service and answers with the upstream JSON.
pub const QUOTE_HOST: &str = "quote-proxy.lan";
pub const QUOTE_PORT: u16 = 8080;
const QUOTE_PATH: &str = "/v7/finance/quote";

const CONNECT_TIMEOUT_SECS: u64 = 10;
const IO_TIMEOUT_SECS: u64 = 10;
const REQUEST_CAPACITY: usize = 256;
const RESPONSE_CAPACITY: usize = 4096;

pub async fn fetch_quotes(stack: Stack<'_>, symbols: &[&'static str]) -> FetchOutcome {
    let address = resolve(stack).await?;

    let mut rx_buffer = [0u8; 2048];
    let mut tx_buffer = [0u8; 512];
    let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(IO_TIMEOUT_SECS)));

    socket
        .connect((address, QUOTE_PORT))
        .with_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .await
        .map_err(|_| FetchError::Connect)?
        .map_err(|_| FetchError::Connect)?;

    let request = build_request(symbols)?;
    send_all(&mut socket, request.as_bytes()).await?;

    let response = read_to_end(&mut socket).await?;
    socket.close();

    let body = http_body(&response)?;
    debug!("quote payload: {} bytes", body.len());

    Ok(wire::scan_update(body, symbols))
}

async fn resolve(stack: Stack<'_>) -> Result<IpAddress, FetchError> {
    let addresses = stack
        .dns_query(QUOTE_HOST, DnsQueryType::A)
        .await
        .map_err(|_| FetchError::Dns)?;

    addresses.first().copied().ok_or(FetchError::Dns)
}

fn build_request(symbols: &[&'static str]) -> Result<String<REQUEST_CAPACITY>, FetchError> {
    let mut request: String<REQUEST_CAPACITY> = String::new();

    write!(request, "GET {}?symbols=", QUOTE_PATH).map_err(|_| FetchError::Request)?;
    for (index, symbol) in symbols.iter().enumerate() {
        if index > 0 {
            request.push(',').map_err(|_| FetchError::Request)?;
        }
        request.push_str(symbol).map_err(|_| FetchError::Request)?;
    }
    write!(
        request,
        " HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        QUOTE_HOST
    )
    .map_err(|_| FetchError::Request)?;

    Ok(request)
}

async fn send_all(socket: &mut TcpSocket<'_>, mut payload: &[u8]) -> Result<(), FetchError> {
    while !payload.is_empty() {
        match socket.write(payload).await {
            Ok(0) | Err(_) => return Err(FetchError::Request),
            Ok(sent) => payload = &payload[sent..],
        }
    }

    Ok(())
}

async fn read_to_end(
    socket: &mut TcpSocket<'_>,
) -> Result<Vec<u8, RESPONSE_CAPACITY>, FetchError> {
    let mut response: Vec<u8, RESPONSE_CAPACITY> = Vec::new();
    let mut chunk = [0u8; 512];

    loop {
        match socket.read(&mut chunk).await {
            Ok(0) => break,
            Ok(received) => {
                if response.extend_from_slice(&chunk[..received]).is_err() {
                    // Oversized response; whatever fit still parses per
                    // symbol, missing tails come back unavailable.
                    break;
                }
            }
            Err(_) => return Err(FetchError::Request),
        }
    }

    Ok(response)
}

fn http_body(response: &[u8]) -> Result<&str, FetchError> {
    let text = core::str::from_utf8(response).map_err(|_| FetchError::Payload)?;

    let (status_line, _) = text.split_once("\r\n").ok_or(FetchError::Payload)?;
    if !status_line.contains(" 200 ") {
        return Err(FetchError::Payload);
    }

    let (_, body) = text.split_once("\r\n\r\n").ok_or(FetchError::Payload)?;
    Ok(body)
}
