//! 配置校验模块
//!
//! 校验规则：
//! - year 合法（1950 起）
//! - event 非空
//! - 两位车手非空且不同
//! - 网格点数 >= 2（保证等距网格可定义步长）
//! - 扇区标记分数位于 (0, 1)，严格递增

use contracts::{ComparisonPlan, ContractError};

/// 校验 ComparisonPlan 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(plan: &ComparisonPlan) -> Result<(), ContractError> {
    validate_session(plan)?;
    validate_drivers(plan)?;
    validate_alignment(plan)?;
    Ok(())
}

/// 校验会话定位
fn validate_session(plan: &ComparisonPlan) -> Result<(), ContractError> {
    if plan.session.year < 1950 {
        return Err(ContractError::config_validation(
            "session.year",
            format!("year must be >= 1950, got {}", plan.session.year),
        ));
    }

    if plan.session.event.trim().is_empty() {
        return Err(ContractError::config_validation(
            "session.event",
            "event name cannot be empty",
        ));
    }

    Ok(())
}

/// 校验车手对
fn validate_drivers(plan: &ComparisonPlan) -> Result<(), ContractError> {
    if plan.drivers.a.is_empty() {
        return Err(ContractError::config_validation(
            "drivers.a",
            "driver code cannot be empty",
        ));
    }
    if plan.drivers.b.is_empty() {
        return Err(ContractError::config_validation(
            "drivers.b",
            "driver code cannot be empty",
        ));
    }
    if plan.drivers.a == plan.drivers.b {
        return Err(ContractError::config_validation(
            "drivers",
            format!("drivers must be distinct, got '{}' twice", plan.drivers.a),
        ));
    }
    Ok(())
}

/// 校验对齐参数
fn validate_alignment(plan: &ComparisonPlan) -> Result<(), ContractError> {
    let alignment = &plan.alignment;

    if alignment.speed_points < 2 {
        return Err(ContractError::config_validation(
            "alignment.speed_points",
            format!("speed_points must be >= 2, got {}", alignment.speed_points),
        ));
    }

    if alignment.map_points < 2 {
        return Err(ContractError::config_validation(
            "alignment.map_points",
            format!("map_points must be >= 2, got {}", alignment.map_points),
        ));
    }

    let fractions = &alignment.marker_fractions;
    for (idx, &fraction) in fractions.iter().enumerate() {
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(ContractError::config_validation(
                format!("alignment.marker_fractions[{idx}]"),
                format!("fraction must be in (0, 1), got {fraction}"),
            ));
        }
    }
    for pair in fractions.windows(2) {
        if pair[1] <= pair[0] {
            return Err(ContractError::config_validation(
                "alignment.marker_fractions",
                "fractions must be strictly increasing",
            ));
        }
    }

    Ok(())
}
