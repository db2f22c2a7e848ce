#![no_std]
#![no_main]

use defmt::{debug, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{Async, Config as UartConfig, Uart, UartRx};
use embassy_sync::channel::Channel;
use embassy_time::{Delay, Duration, Instant, Ticker};
use static_cell::StaticCell;
use stomp_core::types::KNOB_COUNT;
use stompbox::{
    knob, uart_link, ByteChannel, ChannelSource, Controller, KnobCounter, Panel, StatusLight,
    UartSink, BAUD_RATE, DEFAULT_SETTINGS, TICK_MS,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
});

type Stompbox = Controller<'static, ChannelSource, UartSink<'static>, Delay>;

/// Encoder counts, written by the knob tasks and drained by the control task.
static KNOBS: [KnobCounter; KNOB_COUNT] = [
    KnobCounter::new(DEFAULT_SETTINGS.encoder_debounce_ms),
    KnobCounter::new(DEFAULT_SETTINGS.encoder_debounce_ms),
    KnobCounter::new(DEFAULT_SETTINGS.encoder_debounce_ms),
];

/// How long the status LED stays inverted after a receive error, in ms.
const ERROR_FLASH_MS: u64 = 250;

/// Bytes from the receive task to the control task.
static RX_CHANNEL: StaticCell<ByteChannel> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Stompbox starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let channel: &'static ByteChannel = RX_CHANNEL.init(Channel::new());

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BAUD_RATE;

    let uart = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (tx, rx) = uart.split();

    // --- Panel Setup ---
    let buttons = [
        Input::new(p.PIN_0, Pull::Up),  // record
        Input::new(p.PIN_1, Pull::Up),  // stomp 1
        Input::new(p.PIN_2, Pull::Up),  // stomp 2
        Input::new(p.PIN_3, Pull::Up),  // stomp 3
        Input::new(p.PIN_4, Pull::Up),  // stomp 4
        Input::new(p.PIN_5, Pull::Up),  // stomp 5
        Input::new(p.PIN_6, Pull::Up),  // knob 1 select
        Input::new(p.PIN_7, Pull::Up),  // knob 2 select
        Input::new(p.PIN_10, Pull::Up), // knob 3 select
        Input::new(p.PIN_11, Pull::Up), // joystick select
    ];
    let analog = [
        adc::Channel::new_pin(p.PIN_26, Pull::None),
        adc::Channel::new_pin(p.PIN_27, Pull::None),
        adc::Channel::new_pin(p.PIN_28, Pull::None),
        adc::Channel::new_pin(p.PIN_29, Pull::None),
    ];
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let panel = Panel::new(buttons, adc, analog);

    // On-board LED shows link health
    let led = Output::new(p.PIN_25, Level::High);

    let controller = Controller::new(
        DEFAULT_SETTINGS,
        &KNOBS,
        ChannelSource::new(channel),
        UartSink::new(tx),
        Delay,
        Instant::now().as_millis(),
    );

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(
        knob_task(
            Input::new(p.PIN_12, Pull::Up),
            Input::new(p.PIN_13, Pull::Up),
            &KNOBS[0],
        )
        .unwrap(),
    );
    spawner.spawn(
        knob_task(
            Input::new(p.PIN_14, Pull::Up),
            Input::new(p.PIN_15, Pull::Up),
            &KNOBS[1],
        )
        .unwrap(),
    );
    spawner.spawn(
        knob_task(
            Input::new(p.PIN_16, Pull::Up),
            Input::new(p.PIN_17, Pull::Up),
            &KNOBS[2],
        )
        .unwrap(),
    );
    spawner.spawn(rx_task(rx, channel).unwrap());
    spawner.spawn(control_task(controller, panel, led).unwrap());

    info!("Stompbox initialized, {} ms tick", TICK_MS);
}

/// Knob task - the edge-trigger context of one encoder.
#[embassy_executor::task(pool_size = 3)]
async fn knob_task(a: Input<'static>, b: Input<'static>, counter: &'static KnobCounter) {
    knob::watch(a, b, counter).await
}

/// Receive task - moves UART bytes into the channel.
#[embassy_executor::task]
async fn rx_task(rx: UartRx<'static, Async>, channel: &'static ByteChannel) {
    uart_link::pump_rx(rx, channel).await
}

/// Control task - samples the panel and ticks the controller.
#[embassy_executor::task]
async fn control_task(mut controller: Stompbox, mut panel: Panel<'static>, mut led: Output<'static>) {
    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    let mut status = StatusLight::new(ERROR_FLASH_MS);

    loop {
        let snapshot = panel.sample();
        let now = Instant::now().as_millis();
        let report = controller.tick(now, &snapshot).await;

        if report.indicators_changed {
            debug!("indicators: {:?}", controller.indicators());
        }

        let lit = status.update(now, controller.is_connected(), report.receive_errors);
        led.set_level(if lit { Level::High } else { Level::Low });

        ticker.next().await;
    }
}
