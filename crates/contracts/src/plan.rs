//! ComparisonPlan - Config Loader 输出
//!
//! 描述一次完整的对比请求：会话定位、两位车手、对齐参数。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AlignmentConfig, ContractError, DriverCode, LapQuery};

/// 配置版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// 会话类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionType {
    /// 排位赛
    #[default]
    Q,
    /// 正赛
    R,
    /// 一练
    Fp1,
    /// 二练
    Fp2,
    /// 三练
    Fp3,
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionType::Q => "Q",
            SessionType::R => "R",
            SessionType::Fp1 => "FP1",
            SessionType::Fp2 => "FP2",
            SessionType::Fp3 => "FP3",
        };
        write!(f, "{s}")
    }
}

impl FromStr for SessionType {
    type Err = ContractError;

    /// 大小写不敏感
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Q" => Ok(SessionType::Q),
            "R" => Ok(SessionType::R),
            "FP1" => Ok(SessionType::Fp1),
            "FP2" => Ok(SessionType::Fp2),
            "FP3" => Ok(SessionType::Fp3),
            other => Err(ContractError::config_validation(
                "session",
                format!("unknown session type '{other}'"),
            )),
        }
    }
}

/// 会话定位：年份 + 大奖赛 + 会话类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSpec {
    /// 赛季年份
    pub year: u16,

    /// 大奖赛名称 (e.g., "Monaco")
    pub event: String,

    /// 会话类型，默认排位赛
    #[serde(default)]
    pub session: SessionType,
}

/// 待对比的两位车手
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverPair {
    /// 车手 A
    pub a: DriverCode,

    /// 车手 B
    pub b: DriverCode,
}

/// 完整的对比计划
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPlan {
    /// 配置版本
    #[serde(default)]
    pub version: ConfigVersion,

    /// 会话定位
    pub session: SessionSpec,

    /// 车手对
    pub drivers: DriverPair,

    /// 对齐参数
    #[serde(default)]
    pub alignment: AlignmentConfig,
}

impl ComparisonPlan {
    /// Build the two provider queries this plan describes.
    pub fn queries(&self) -> (LapQuery, LapQuery) {
        let base = |driver: &DriverCode| LapQuery {
            year: self.session.year,
            event: self.session.event.clone(),
            session: self.session.session,
            driver: driver.clone(),
        };
        (base(&self.drivers.a), base(&self.drivers.b))
    }
}
