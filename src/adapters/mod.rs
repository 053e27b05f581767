//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements        | Connects to                 |
//! |-------------|-------------------|-----------------------------|
//! | `hardware`  | RangingPort       | Ultrasonic TRIG/ECHO GPIO   |
//! |             | TipSourcePort     | Rain-gauge GPIO ISR         |
//! | `lora`      | RadioPort         | LoRaWAN modem (stub)        |
//! | `sleep`     | SleepPort         | ESP32 RTC timer deep sleep  |
//! | `log_sink`  | EventSink         | Serial log output           |

pub mod hardware;
pub mod log_sink;
pub mod lora;
pub mod sleep;
