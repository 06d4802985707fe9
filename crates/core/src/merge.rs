use crate::config::{MediaQueryOverride, UnitSettings};

impl UnitSettings {
    /// 合并媒体查询覆盖配置
    ///
    /// 功能：
    /// - 覆盖中已设置的字段取覆盖值（后者覆盖前者）
    /// - 未设置的字段沿用基础配置
    /// - clamp 倍数在校验阶段已解析，直接取覆盖值
    pub fn merged(&self, o: &MediaQueryOverride) -> UnitSettings {
        UnitSettings {
            viewport_width: o.viewport_width.unwrap_or(self.viewport_width),
            unit_precision: o.unit_precision.unwrap_or(self.unit_precision),
            min_pixel_value: o.min_pixel_value.unwrap_or(self.min_pixel_value),
            max_ratio: o.max_ratio.unwrap_or(self.max_ratio),
            min_ratio: o.min_ratio.unwrap_or(self.min_ratio),
            clamp_min_ratio: o.clamp_min_ratio,
            clamp_max_ratio: o.clamp_max_ratio,
            linear_min_width: o.linear_min_width.unwrap_or(self.linear_min_width),
            linear_max_width: o.linear_max_width.unwrap_or(self.linear_max_width),
            auto_clamp_linear: o.auto_clamp_linear.unwrap_or(self.auto_clamp_linear),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_override() -> MediaQueryOverride {
        MediaQueryOverride {
            viewport_width: None,
            unit_precision: None,
            min_pixel_value: None,
            max_ratio: None,
            min_ratio: None,
            clamp_min_ratio: 1.0,
            clamp_max_ratio: 1.0,
            linear_min_width: None,
            linear_max_width: None,
            auto_clamp_linear: None,
        }
    }

    #[test]
    fn test_merge_override() {
        let base = UnitSettings::default();
        let merged = base.merged(&MediaQueryOverride {
            viewport_width: Some(768.0),
            unit_precision: Some(2),
            ..empty_override()
        });
        assert_eq!(merged.viewport_width, 768.0);
        assert_eq!(merged.unit_precision, 2);
        assert_eq!(merged.min_pixel_value, base.min_pixel_value);
        assert_eq!(merged.linear_max_width, base.linear_max_width);
    }

    #[test]
    fn test_merge_keeps_base_when_empty() {
        let base = UnitSettings {
            auto_clamp_linear: false,
            ..UnitSettings::default()
        };
        assert_eq!(base.merged(&empty_override()), base);
    }

    #[test]
    fn test_merge_takes_resolved_clamp_ratios() {
        let base = UnitSettings {
            clamp_min_ratio: 0.3,
            clamp_max_ratio: 3.0,
            ..UnitSettings::default()
        };
        let merged = base.merged(&MediaQueryOverride {
            clamp_min_ratio: 0.5,
            clamp_max_ratio: 2.0,
            ..empty_override()
        });
        assert_eq!(merged.clamp_min_ratio, 0.5);
        assert_eq!(merged.clamp_max_ratio, 2.0);
    }
}
