//! 学年学期推导
//!
//! 固定的学年日历规则：一学年两个学期，GANJIL（单数学期）为 8 月至次年 1 月，
//! GENAP（双数学期）为 2 月至 7 月。学年以起始年表示，格式 "YYYY/YYYY+1"。
//! 过去学期的大作业禁止修改小组成员（只读查询不受限制）。

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学期
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/semester.ts")]
pub enum Semester {
    Ganjil, // 单数学期：8月 - 次年1月
    Genap,  // 双数学期：2月 - 7月
}

impl Semester {
    pub const GANJIL: &'static str = "GANJIL";
    pub const GENAP: &'static str = "GENAP";
}

impl<'de> Deserialize<'de> for Semester {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            Semester::GANJIL => Ok(Semester::Ganjil),
            Semester::GENAP => Ok(Semester::Genap),
            _ => Err(serde::de::Error::custom(format!(
                "无效的学期: '{s}'. 支持的学期: GANJIL, GENAP"
            ))),
        }
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Semester::Ganjil => write!(f, "{}", Semester::GANJIL),
            Semester::Genap => write!(f, "{}", Semester::GENAP),
        }
    }
}

impl std::str::FromStr for Semester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GANJIL" => Ok(Semester::Ganjil),
            "GENAP" => Ok(Semester::Genap),
            _ => Err(format!("Invalid semester: {s}")),
        }
    }
}

/// 学年学期组合，按 (起始年, 学期) 排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AcademicTerm {
    pub start_year: i32,
    pub semester: Semester,
}

impl AcademicTerm {
    /// 学年字符串，如 "2025/2026"
    pub fn academic_year(&self) -> String {
        format!("{}/{}", self.start_year, self.start_year + 1)
    }
}

/// 从学年字符串解析起始年，如 "2025/2026" -> 2025
pub fn parse_academic_year(academic_year: &str) -> Option<i32> {
    academic_year.split('/').next()?.parse::<i32>().ok()
}

/// 根据日期推导所属学年学期
pub fn term_for_date(date: NaiveDate) -> AcademicTerm {
    let month = date.month();
    let year = date.year();

    if month >= 8 {
        // 8月-12月：GANJIL，学年为 当年/次年
        AcademicTerm {
            start_year: year,
            semester: Semester::Ganjil,
        }
    } else if month == 1 {
        // 1月：仍属上一学年的 GANJIL
        AcademicTerm {
            start_year: year - 1,
            semester: Semester::Ganjil,
        }
    } else {
        // 2月-7月：GENAP，学年为 上一年/当年
        AcademicTerm {
            start_year: year - 1,
            semester: Semester::Genap,
        }
    }
}

/// 当前学年学期（墙上时钟）
pub fn current_term() -> AcademicTerm {
    term_for_date(Utc::now().date_naive())
}

/// 给定学年学期是否严格早于当前学期（即已被锁定）
///
/// 学年字符串无法解析时视为未锁定，与存量脏数据兼容。
pub fn is_locked(academic_year: &str, semester: Semester) -> bool {
    let Some(start_year) = parse_academic_year(academic_year) else {
        return false;
    };
    let given = AcademicTerm {
        start_year,
        semester,
    };
    given < current_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_term_for_date_boundaries() {
        // 8月起进入 GANJIL，学年为 当年/次年
        assert_eq!(
            term_for_date(date(2025, 8, 1)),
            AcademicTerm {
                start_year: 2025,
                semester: Semester::Ganjil
            }
        );
        assert_eq!(
            term_for_date(date(2025, 12, 31)),
            AcademicTerm {
                start_year: 2025,
                semester: Semester::Ganjil
            }
        );
        // 1月仍属上一学年的 GANJIL
        assert_eq!(
            term_for_date(date(2026, 1, 15)),
            AcademicTerm {
                start_year: 2025,
                semester: Semester::Ganjil
            }
        );
        // 2月-7月为 GENAP
        assert_eq!(
            term_for_date(date(2026, 2, 1)),
            AcademicTerm {
                start_year: 2025,
                semester: Semester::Genap
            }
        );
        assert_eq!(
            term_for_date(date(2026, 7, 31)),
            AcademicTerm {
                start_year: 2025,
                semester: Semester::Genap
            }
        );
    }

    #[test]
    fn test_term_ordering() {
        let ganjil_2024 = AcademicTerm {
            start_year: 2024,
            semester: Semester::Ganjil,
        };
        let genap_2024 = AcademicTerm {
            start_year: 2024,
            semester: Semester::Genap,
        };
        let ganjil_2025 = AcademicTerm {
            start_year: 2025,
            semester: Semester::Ganjil,
        };

        // 同一学年内 GANJIL 先于 GENAP
        assert!(ganjil_2024 < genap_2024);
        assert!(genap_2024 < ganjil_2025);
    }

    #[test]
    fn test_academic_year_string_roundtrip() {
        let term = AcademicTerm {
            start_year: 2025,
            semester: Semester::Ganjil,
        };
        assert_eq!(term.academic_year(), "2025/2026");
        assert_eq!(parse_academic_year("2025/2026"), Some(2025));
        assert_eq!(parse_academic_year("not-a-year"), None);
    }

    #[test]
    fn test_is_locked_relative_to_current() {
        let current = current_term();

        // 上一学年总是锁定，下一学年永不锁定
        let past_year = AcademicTerm {
            start_year: current.start_year - 1,
            semester: current.semester,
        };
        let future_year = AcademicTerm {
            start_year: current.start_year + 1,
            semester: current.semester,
        };
        assert!(is_locked(&past_year.academic_year(), past_year.semester));
        assert!(!is_locked(&future_year.academic_year(), future_year.semester));

        // 当前学期本身未锁定
        assert!(!is_locked(&current.academic_year(), current.semester));

        // 当前为 GENAP 时，同学年的 GANJIL 已锁定
        if current.semester == Semester::Genap {
            assert!(is_locked(&current.academic_year(), Semester::Ganjil));
        }
    }

    #[test]
    fn test_is_locked_unparseable_year() {
        assert!(!is_locked("garbage", Semester::Ganjil));
    }

    #[test]
    fn test_semester_parse_display() {
        assert_eq!("GANJIL".parse::<Semester>().unwrap(), Semester::Ganjil);
        assert_eq!(Semester::Genap.to_string(), "GENAP");
        assert!("ganjil".parse::<Semester>().is_err());
    }
}
