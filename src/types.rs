// src/types.rs
use std::path::PathBuf;
use std::time::Duration;

// 串口采集参数
#[derive(Clone, Debug, PartialEq)]
pub struct SerialSettings {
    pub device: String,
    pub baud_rate: u32,
    pub polling_period: Duration,
    pub collection_time: Duration,
    pub read_timeout: Duration,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            device: String::new(),
            baud_rate: 9600,
            polling_period: Duration::from_millis(1),
            collection_time: Duration::from_secs(10),
            read_timeout: Duration::from_secs(1),
        }
    }
}

// 数据来源：读取存档 或 串口采集
#[derive(Clone, Debug, PartialEq)]
pub enum DataSource {
    Loaded(PathBuf),
    Acquired(SerialSettings),
}

// 可选的探索性图表
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_overlay: bool,
    pub show_histograms: bool,
}
