//! Encoder edge loop.
//!
//! Each knob gets its own task that sleeps on phase A and records one step
//! per edge. The loop is generic over the `embedded-hal` pin traits so it
//! does not care which GPIOs it is given.

use embassy_time::Instant;
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;
use stomp_core::KnobCounter;

/// Wait for edges on `a` and record them in `counter` forever.
///
/// Both phases are read right after the edge; a failed read skips that
/// edge.
pub async fn watch<A, B>(mut a: A, mut b: B, counter: &KnobCounter) -> !
where
    A: Wait + InputPin,
    B: InputPin,
{
    loop {
        if a.wait_for_any_edge().await.is_err() {
            continue;
        }
        let (Ok(level_a), Ok(level_b)) = (a.is_high(), b.is_high()) else {
            continue;
        };
        // Wraps after ~49 days; the debounce only compares nearby edges
        let now = Instant::now().as_millis() as u32;
        counter.on_edge(level_a, level_b, now);
    }
}
