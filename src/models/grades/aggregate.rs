//! 总评成绩聚合
//!
//! 先将每个评分项的有效得分归一化为百分比（effective / max_score * 100），
//! 再按权重求加权平均，分母只计入已评分项的权重。
//! 仅评了部分权重时，结果仍是 0-100 的百分比，而不是按总权重折算的部分分。

// 参与聚合的单个评分项得分
#[derive(Debug, Clone, Copy)]
pub struct ComponentScore {
    pub max_score: f64,
    pub weight: f64,
    pub team_score: Option<f64>,
    pub individual_score: Option<f64>,
}

impl ComponentScore {
    // 个人评分存在时覆盖小组评分
    pub fn effective(&self) -> Option<f64> {
        self.individual_score.or(self.team_score)
    }
}

/// 计算归一化加权总评，保留两位小数
///
/// 没有任何已评分项（或已评分项权重之和为零）时返回 `None`，表示"未评分"。
pub fn final_grade(scores: &[ComponentScore]) -> Option<f64> {
    let mut weighted_sum = 0.0;
    let mut weight_covered = 0.0;

    for component in scores {
        let Some(effective) = component.effective() else {
            continue;
        };
        if component.max_score <= 0.0 {
            continue;
        }
        let percentage = effective / component.max_score * 100.0;
        weighted_sum += percentage * component.weight;
        weight_covered += component.weight;
    }

    if weight_covered == 0.0 {
        return None;
    }
    Some(round2(weighted_sum / weight_covered))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(
        max_score: f64,
        weight: f64,
        team_score: Option<f64>,
        individual_score: Option<f64>,
    ) -> ComponentScore {
        ComponentScore {
            max_score,
            weight,
            team_score,
            individual_score,
        }
    }

    #[test]
    fn test_weighted_grade_with_individual_override() {
        // A: 满分100 权重70，小组得90（90%）
        // B: 满分50 权重30，个人覆盖15（30%）
        // (90*70 + 30*30) / 100 = 72.00
        let scores = [
            component(100.0, 70.0, Some(90.0), None),
            component(50.0, 30.0, Some(40.0), Some(15.0)),
        ];
        assert_eq!(final_grade(&scores), Some(72.0));
    }

    #[test]
    fn test_partial_grading_normalizes_by_covered_weight() {
        // 只评了A（90%），分母是70不是100：(90*70)/70 = 90.00，而不是63.00
        let scores = [
            component(100.0, 70.0, Some(90.0), None),
            component(50.0, 30.0, None, None),
        ];
        assert_eq!(final_grade(&scores), Some(90.0));
    }

    #[test]
    fn test_no_grades_returns_none() {
        let scores = [
            component(100.0, 70.0, None, None),
            component(50.0, 30.0, None, None),
        ];
        assert_eq!(final_grade(&scores), None);
    }

    #[test]
    fn test_empty_component_list_returns_none() {
        assert_eq!(final_grade(&[]), None);
    }

    #[test]
    fn test_zero_weight_covered_returns_none() {
        // 已评分项权重为零时没有可归一化的分母
        let scores = [component(100.0, 0.0, Some(80.0), None)];
        assert_eq!(final_grade(&scores), None);
    }

    #[test]
    fn test_individual_takes_precedence_over_team() {
        let scores = [component(100.0, 100.0, Some(50.0), Some(80.0))];
        assert_eq!(final_grade(&scores), Some(80.0));
    }

    #[test]
    fn test_individual_zero_still_overrides() {
        // 0 分也是有效的个人覆盖
        let scores = [component(100.0, 100.0, Some(50.0), Some(0.0))];
        assert_eq!(final_grade(&scores), Some(0.0));
    }

    #[test]
    fn test_max_score_normalization() {
        // 满分20得18（90%），满分200得100（50%），各占一半权重
        let scores = [
            component(20.0, 50.0, Some(18.0), None),
            component(200.0, 50.0, Some(100.0), None),
        ];
        assert_eq!(final_grade(&scores), Some(70.0));
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        // 1/3 权重对称：(100 + 50 + 25) / 3 = 58.333...
        let scores = [
            component(100.0, 10.0, Some(100.0), None),
            component(100.0, 10.0, Some(50.0), None),
            component(100.0, 10.0, Some(25.0), None),
        ];
        assert_eq!(final_grade(&scores), Some(58.33));
    }

    #[test]
    fn test_weights_not_summing_to_hundred() {
        // 软性约束：权重和可以不是100，聚合只看已评分项的权重比例
        let scores = [
            component(100.0, 30.0, Some(80.0), None),
            component(100.0, 30.0, Some(60.0), None),
        ];
        assert_eq!(final_grade(&scores), Some(70.0));
    }
}
