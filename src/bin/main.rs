#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_net::Stack;
use embassy_time::{Duration as EmbassyDuration, Timer, WithTimeout};
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    clock::CpuClock,
    delay::Delay,
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    spi::master::Spi,
    time::{Instant, Rate},
    timer::timg::TimerGroup,
};
use esp_radio::wifi::{ClientConfig, ModeConfig, WifiController};
use glance_core::{
    app::{GlanceApp, TickResult},
    config::TickerConfig,
    input::ButtonLatch,
    quote::FetchError,
};
use glance_hal_esp32s3::{
    input::{EpdHatKeys, KeysConfig},
    network::{ConnectivityHandle, WifiConfig},
    platform::display::EpdDisplay,
    render::{FrameRenderer, panel::PanelRenderer},
    time::WallClockHandle,
};
use epd2in7::FrameBuffer;
use log::{LevelFilter, info, warn};
use static_cell::StaticCell;

#[path = "main/clock_sync.rs"]
mod clock_sync;
#[path = "main/quote_refill.rs"]
mod quote_refill;

const DISPLAY_SPI_HZ: u32 = 2_000_000;
const TICK_INTERVAL_MS: u64 = 500;
const KEY_POLL_INTERVAL_MS: u64 = 10;

/// Symbols shown on the table, one panel row each.
const SYMBOLS: &[&str] = &["AAPL", "ARKW", "TSLA", "U", "TQQQ", "MSFT"];

/// Fixed local-time offset from UTC in minutes. No DST handling; adjust at
/// build time when the clocks change.
const TZ_OFFSET_MINUTES: i32 = 60;

const WIFI_RETRY_BACKOFF_MIN_SECS: u64 = 2;
const WIFI_RETRY_BACKOFF_MAX_SECS: u64 = 120;
const NETWORK_POLL_INTERVAL_MS: u64 = 500;
const DHCP_TIMEOUT_SECS: u64 = 15;

const WIFI_SSID: &str = env!(
    "GLANCE_WIFI_SSID",
    "Set GLANCE_WIFI_SSID in your environment before building/flashing."
);
const WIFI_PASSWORD: &str = env!(
    "GLANCE_WIFI_PASSWORD",
    "Set GLANCE_WIFI_PASSWORD in your environment before building/flashing."
);
const WIFI_CONFIG: WifiConfig = WifiConfig::new(WIFI_SSID, WIFI_PASSWORD);

static CONNECTIVITY: ConnectivityHandle = ConnectivityHandle::new();
static WALL_CLOCK: WallClockHandle = WallClockHandle::new();
static BUTTONS: ButtonLatch = ButtonLatch::new();
static NET_RESOURCES: StaticCell<embassy_net::StackResources<4>> = StaticCell::new();

#[panic_handler]
fn panic(_: &core::panic::PanicInfo) -> ! {
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

fn wifi_retry_backoff_secs(consecutive_failures: u32) -> u64 {
    // 2, 4, 8, 16, 32, 64, 120, 120, ...
    let shift = consecutive_failures.min(6);
    WIFI_RETRY_BACKOFF_MIN_SECS
        .saturating_mul(1u64 << shift)
        .min(WIFI_RETRY_BACKOFF_MAX_SECS)
}

async fn wait_before_wifi_retry(consecutive_failures: &mut u32) {
    let delay_secs = wifi_retry_backoff_secs(*consecutive_failures);
    *consecutive_failures = consecutive_failures.saturating_add(1);
    info!(
        "wifi retrying in {}s (consecutive_failures={})",
        delay_secs, *consecutive_failures
    );
    Timer::after_secs(delay_secs).await;
}

async fn wifi_connection_loop(
    wifi_controller: &mut WifiController<'_>,
    stack: Stack<'_>,
    connectivity: &'static ConnectivityHandle,
) -> ! {
    let mut consecutive_failures = 0u32;

    loop {
        connectivity.mark_connecting();

        if !wifi_controller.is_started().unwrap_or(false) {
            if let Err(err) = wifi_controller.start_async().await {
                info!("wifi start failed: {:?}", err);
                connectivity.mark_disconnected();
                wait_before_wifi_retry(&mut consecutive_failures).await;
                continue;
            }
        }

        if let Err(err) = wifi_controller.connect_async().await {
            info!("wifi connect failed: {:?}", err);
            connectivity.mark_disconnected();
            let _ = wifi_controller.disconnect_async().await;
            wait_before_wifi_retry(&mut consecutive_failures).await;
            continue;
        }

        match stack
            .wait_config_up()
            .with_timeout(EmbassyDuration::from_secs(DHCP_TIMEOUT_SECS))
            .await
        {
            Ok(()) => {
                connectivity.update_link_ip(stack.is_link_up(), stack.config_v4().is_some());
                info!("wifi connected and dhcp ready");
            }
            Err(_) => {
                info!("dhcp timeout; forcing reconnect");
                connectivity.update_link_ip(stack.is_link_up(), false);
                let _ = wifi_controller.disconnect_async().await;
                wait_before_wifi_retry(&mut consecutive_failures).await;
                continue;
            }
        }

        consecutive_failures = 0;

        loop {
            let link_up = stack.is_link_up();
            let has_ipv4 = stack.config_v4().is_some();
            let is_connected = matches!(wifi_controller.is_connected(), Ok(true));

            connectivity.update_link_ip(link_up, has_ipv4);

            if !(link_up && has_ipv4 && is_connected) {
                info!(
                    "wifi state lost (link_up={} has_ipv4={} connected={}); reconnecting",
                    link_up, has_ipv4, is_connected
                );
                break;
            }

            Timer::after_millis(NETWORK_POLL_INTERVAL_MS).await;
        }

        connectivity.mark_disconnected();
        let _ = wifi_controller.disconnect_async().await;
        wait_before_wifi_retry(&mut consecutive_failures).await;
    }
}

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    esp_println::logger::init_logger(LevelFilter::Info);
    esp_println::println!("boot: glance starting");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // esp-radio requires an allocator.
    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 65536);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // E-paper HAT wiring:
    // SCK=GPIO12, MOSI=GPIO11, CS=GPIO10, DC=GPIO18, RST=GPIO16, BUSY=GPIO17
    let cs = Output::new(peripherals.GPIO10, Level::High, OutputConfig::default());
    let dc = Output::new(peripherals.GPIO18, Level::Low, OutputConfig::default());
    let rst = Output::new(peripherals.GPIO16, Level::High, OutputConfig::default());
    let busy = Input::new(peripherals.GPIO17, InputConfig::default());

    let spi_config = esp_hal::spi::master::Config::default()
        .with_frequency(Rate::from_hz(DISPLAY_SPI_HZ))
        // The UC8176-class controller on this panel uses CPOL=0, CPHA=0.
        .with_mode(esp_hal::spi::Mode::_0);

    let spi = Spi::new(peripherals.SPI2, spi_config)
        .unwrap()
        .with_sck(peripherals.GPIO12)
        .with_mosi(peripherals.GPIO11);

    let mut delay = Delay::new();

    let spi_device = match ExclusiveDevice::new(spi, cs, Delay::new()) {
        Ok(device) => device,
        Err(err) => {
            info!("display CS setup failed: {:?}", err);
            loop {
                Timer::after_secs(1).await;
            }
        }
    };

    let mut display = EpdDisplay::new(spi_device, dc, rst, busy);
    esp_println::println!("display: init begin (SCK=12 MOSI=11 CS=10 DC=18 RST=16 BUSY=17)");
    if let Err(err) = display.initialize(&mut delay) {
        // A dead panel makes the device useless; park instead of burning
        // refresh cycles into the void.
        esp_println::println!("display: initialize failed");
        info!("display initialize failed: {:?}", err);
        loop {
            Timer::after_secs(1).await;
        }
    }
    esp_println::println!("display: initialize ok");

    // HAT keys: KEY1=GPIO1, KEY2=GPIO2, KEY3=GPIO4, KEY4=GPIO5, all to GND.
    let key_cfg = InputConfig::default().with_pull(Pull::Up);
    let mut keys = match EpdHatKeys::new(
        Input::new(peripherals.GPIO1, key_cfg),
        Input::new(peripherals.GPIO2, key_cfg),
        Input::new(peripherals.GPIO4, key_cfg),
        Input::new(peripherals.GPIO5, key_cfg),
        KeysConfig::default(),
    ) {
        Ok(keys) => keys,
        Err(err) => {
            info!("key setup failed: {:?}", err);
            loop {
                Timer::after_secs(1).await;
            }
        }
    };

    let ticker_config = match TickerConfig::new(SYMBOLS) {
        Ok(config) => config,
        Err(err) => {
            info!("fatal config error: {:?}", err);
            loop {
                Timer::after_secs(1).await;
            }
        }
    };

    let mut renderer = PanelRenderer::new();
    let mut frame = FrameBuffer::new();
    let mut app = GlanceApp::new(&BUTTONS, ticker_config);

    let radio = match esp_radio::init() {
        Ok(radio) => radio,
        Err(err) => {
            info!("esp-radio init failed: {:?}", err);
            loop {
                Timer::after_secs(1).await;
            }
        }
    };

    let (mut wifi_controller, interfaces) =
        match esp_radio::wifi::new(&radio, peripherals.WIFI, esp_radio::wifi::Config::default()) {
            Ok(parts) => parts,
            Err(err) => {
                info!("wifi peripheral init failed: {:?}", err);
                loop {
                    Timer::after_secs(1).await;
                }
            }
        };

    let client_config = ClientConfig::default()
        .with_ssid(WIFI_CONFIG.ssid.into())
        .with_password(WIFI_CONFIG.password.into());
    let wifi_mode = ModeConfig::Client(client_config);
    if let Err(err) = wifi_controller.set_config(&wifi_mode) {
        info!("wifi mode config failed: {:?}", err);
        loop {
            Timer::after_secs(1).await;
        }
    }

    let stack_config = embassy_net::Config::dhcpv4(Default::default());
    let (stack, mut net_runner) = embassy_net::new(
        interfaces.sta,
        stack_config,
        NET_RESOURCES.init(embassy_net::StackResources::<4>::new()),
        0x6C4A_91D2_0B5F_37E8,
    );

    let boot = Instant::now();

    info!(
        "Glance started: symbols={:?} tick_ms={} spi_hz={}",
        SYMBOLS, TICK_INTERVAL_MS, DISPLAY_SPI_HZ
    );
    info!("Display pins: SCK=GPIO12 MOSI=GPIO11 CS=GPIO10 DC=GPIO18 RST=GPIO16 BUSY=GPIO17");
    info!("Key pins: KEY1=GPIO1 KEY2=GPIO2 KEY3=GPIO4 KEY4=GPIO5");
    info!(
        "Quote endpoint: {}:{} tz_offset_minutes={}",
        quote_refill::QUOTE_HOST,
        quote_refill::QUOTE_PORT,
        TZ_OFFSET_MINUTES
    );

    CONNECTIVITY.mark_connecting();

    let net_future = net_runner.run();
    let wifi_future = wifi_connection_loop(&mut wifi_controller, stack, &CONNECTIVITY);
    let sntp_future = clock_sync::run(stack, &WALL_CLOCK, &CONNECTIVITY, boot);
    let keys_future = async {
        loop {
            match keys.poll() {
                Ok(Some(event)) => BUTTONS.press(event),
                Ok(None) => {}
                Err(err) => warn!("key poll failed: {:?}", err),
            }
            Timer::after_millis(KEY_POLL_INTERVAL_MS).await;
        }
    };
    let ui_future = async {
        let mut last_connectivity_revision = u32::MAX;
        let mut sync_wait_logged = false;
        let mut display_fault_logged = false;

        loop {
            let connectivity = CONNECTIVITY.snapshot();
            if connectivity.revision != last_connectivity_revision {
                info!("connectivity: {:?}", connectivity.state);
                last_connectivity_revision = connectivity.revision;
            }

            // Everything downstream needs local time; hold the tick loop
            // until SNTP lands the first anchor.
            let Some(mut now) = WALL_CLOCK.tick_instant(boot.elapsed().as_millis(), TZ_OFFSET_MINUTES)
            else {
                if !sync_wait_logged {
                    info!("waiting for first time sync");
                    sync_wait_logged = true;
                }
                Timer::after_millis(TICK_INTERVAL_MS).await;
                continue;
            };

            if app.fetch_pending() {
                let outcome = if connectivity.online() {
                    quote_refill::fetch_quotes(stack, SYMBOLS).await
                } else {
                    Err(FetchError::Connect)
                };
                // The fetch can take seconds; re-anchor before folding in.
                if let Some(after_fetch) =
                    WALL_CLOCK.tick_instant(boot.elapsed().as_millis(), TZ_OFFSET_MINUTES)
                {
                    now = after_fetch;
                }
                app.complete_stock_fetch(outcome, now);
            }

            if app.tick(now) == TickResult::RenderRequested {
                app.with_screen(|screen| renderer.render(screen, &mut frame));
                if let Err(err) = display.flush_frame(&frame, &mut delay) {
                    if !display_fault_logged {
                        info!("display flush failed: {:?}", err);
                        display_fault_logged = true;
                    }
                } else {
                    display_fault_logged = false;
                }
            }

            Timer::after_millis(TICK_INTERVAL_MS).await;
        }
    };

    let _ = embassy_futures::join::join5(
        net_future,
        wifi_future,
        sntp_future,
        keys_future,
        ui_future,
    )
    .await;
    unreachable!()
}
