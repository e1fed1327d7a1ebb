//! SNTP worker feeding the shared wall-clock anchor.

use embassy_net::{
    IpEndpoint, Stack,
    dns::DnsQueryType,
    udp::{PacketMetadata, UdpSocket},
};
use embassy_time::{Duration, Timer, WithTimeout};
use esp_hal::time::Instant;
use glance_hal_esp32s3::{network::ConnectivityHandle, time::WallClockHandle};
use log::{info, warn};

const NTP_HOST: &str = "pool.ntp.org";
const NTP_PORT: u16 = 123;
const LOCAL_PORT: u16 = 50123;
// NTP counts seconds from 1900, Unix from 1970.
const SECONDS_1900_TO_1970: u32 = 2_208_988_800;
const RESYNC_INTERVAL_SECS: u64 = 3_600;
const RETRY_INTERVAL_SECS: u64 = 10;
const REPLY_TIMEOUT_MS: u64 = 1_500;

pub async fn run(
    stack: Stack<'_>,
    wall_clock: &'static WallClockHandle,
    connectivity: &'static ConnectivityHandle,
    boot: Instant,
) -> ! {
    let mut rx_meta = [PacketMetadata::EMPTY; 4];
    let mut tx_meta = [PacketMetadata::EMPTY; 4];
    let mut rx_buffer = [0u8; 128];
    let mut tx_buffer = [0u8; 128];

    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );
    if socket.bind(LOCAL_PORT).is_err() {
        warn!("sntp: local bind failed");
    }

    loop {
        if !connectivity.snapshot().online() {
            Timer::after_secs(1).await;
            continue;
        }

        match sync_once(stack, &mut socket, wall_clock, boot).await {
            Ok(epoch_secs) => {
                info!("sntp: synced epoch={}", epoch_secs);
                Timer::after_secs(RESYNC_INTERVAL_SECS).await;
            }
            Err(reason) => {
                warn!("sntp: {}", reason);
                Timer::after_secs(RETRY_INTERVAL_SECS).await;
            }
        }
    }
}

async fn sync_once(
    stack: Stack<'_>,
    socket: &mut UdpSocket<'_>,
    wall_clock: &'static WallClockHandle,
    boot: Instant,
) -> Result<u32, &'static str> {
    let addresses = stack
        .dns_query(NTP_HOST, DnsQueryType::A)
        .await
        .map_err(|_| "dns query failed")?;
    let address = *addresses.first().ok_or("no server address")?;

    // LI=0, VN=4, mode=3 (client).
    let mut request = [0u8; 48];
    request[0] = 0x23;

    socket
        .send_to(&request, IpEndpoint::new(address, NTP_PORT))
        .await
        .map_err(|_| "send failed")?;

    let mut reply = [0u8; 48];
    let (len, _) = socket
        .recv_from(&mut reply)
        .with_timeout(Duration::from_millis(REPLY_TIMEOUT_MS))
        .await
        .map_err(|_| "reply timeout")?
        .map_err(|_| "recv failed")?;

    if len < 44 {
        return Err("short reply");
    }

    // Transmit timestamp, integer seconds.
    let ntp_secs = u32::from_be_bytes([reply[40], reply[41], reply[42], reply[43]]);
    if ntp_secs == 0 {
        return Err("empty timestamp");
    }

    let epoch_secs = ntp_secs.wrapping_sub(SECONDS_1900_TO_1970);
    wall_clock.publish(epoch_secs, boot.elapsed().as_millis());

    Ok(epoch_secs)
}
