use once_cell::sync::Lazy;
use regex::Regex;

static ACADEMIC_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})/(\d{4})$").expect("Invalid academic year regex"));

/// 校验学年字符串格式：必须形如 "2025/2026" 且后一年紧接前一年
pub fn validate_academic_year(academic_year: &str) -> Result<(), &'static str> {
    let Some(caps) = ACADEMIC_YEAR_RE.captures(academic_year) else {
        return Err("Academic year must be formatted as YYYY/YYYY");
    };
    let start: i32 = caps[1].parse().map_err(|_| "Invalid academic year")?;
    let end: i32 = caps[2].parse().map_err(|_| "Invalid academic year")?;
    if end != start + 1 {
        return Err("Academic year end must be start year plus one");
    }
    Ok(())
}

/// 校验评分项参数
///
/// 注意：这里不校验该大作业所有评分项权重之和是否为 100。
/// 权重之和允许偏离 100（软约束），由响应中的 total_weight 提示调用方。
pub fn validate_grade_component(
    name: &str,
    max_score: f64,
    weight: f64,
) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Component name must not be empty");
    }
    if !max_score.is_finite() || max_score <= 0.0 {
        return Err("Component max score must be greater than 0");
    }
    if !weight.is_finite() || !(0.0..=100.0).contains(&weight) {
        return Err("Component weight must be between 0 and 100");
    }
    Ok(())
}

/// 校验截止日期先后：评分截止不得早于提交截止
///
/// 任一日期缺失时不做比较（时间戳为 Unix 秒）。
pub fn validate_due_date_order(
    assignment_due: Option<i64>,
    grading_due: Option<i64>,
) -> Result<(), &'static str> {
    if let (Some(assignment), Some(grading)) = (assignment_due, grading_due)
        && grading < assignment
    {
        return Err("Grading due date must not be earlier than assignment due date");
    }
    Ok(())
}

/// 校验小组规模参数
pub fn validate_team_shape(num_teams: i32, max_members_per_team: i32) -> Result<(), &'static str> {
    if num_teams < 1 {
        return Err("Number of teams must be at least 1");
    }
    if max_members_per_team < 1 {
        return Err("Max members per team must be at least 1");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_academic_year() {
        assert!(validate_academic_year("2025/2026").is_ok());
        assert!(validate_academic_year("2025/2027").is_err());
        assert!(validate_academic_year("2025-2026").is_err());
        assert!(validate_academic_year("25/26").is_err());
        assert!(validate_academic_year("").is_err());
    }

    #[test]
    fn test_validate_grade_component() {
        assert!(validate_grade_component("Report", 100.0, 70.0).is_ok());
        assert!(validate_grade_component("", 100.0, 70.0).is_err());
        assert!(validate_grade_component("   ", 100.0, 70.0).is_err());
        assert!(validate_grade_component("Report", 0.0, 70.0).is_err());
        assert!(validate_grade_component("Report", -5.0, 70.0).is_err());
        assert!(validate_grade_component("Report", 100.0, -1.0).is_err());
        assert!(validate_grade_component("Report", 100.0, 100.5).is_err());
        // 边界值合法
        assert!(validate_grade_component("Report", 0.5, 0.0).is_ok());
        assert!(validate_grade_component("Report", 100.0, 100.0).is_ok());
    }

    #[test]
    fn test_validate_due_date_order() {
        assert!(validate_due_date_order(Some(1000), Some(2000)).is_ok());
        assert!(validate_due_date_order(Some(1000), Some(1000)).is_ok());
        assert!(validate_due_date_order(Some(2000), Some(1000)).is_err());
        // 缺一侧不比较
        assert!(validate_due_date_order(None, Some(1000)).is_ok());
        assert!(validate_due_date_order(Some(2000), None).is_ok());
        assert!(validate_due_date_order(None, None).is_ok());
    }

    #[test]
    fn test_validate_team_shape() {
        assert!(validate_team_shape(4, 5).is_ok());
        assert!(validate_team_shape(0, 5).is_err());
        assert!(validate_team_shape(4, 0).is_err());
    }
}
