// 領域層：核心模型、畫面資料與埠 (介面)

pub mod model;
pub mod ports;
pub mod presentation;
