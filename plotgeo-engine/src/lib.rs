pub mod convert;
pub mod tessellate;

pub mod errors {
    use plotgeo_core::document::GeometryKind;
    use thiserror::Error;

    /// 降级引擎的错误分类。可恢复的情形（超长段长、按策略跳过的退化
    /// 三点组）在组件内部以警告加默认值处理，结构性错误原样上抛。
    #[derive(Debug, Error)]
    pub enum ConvertError {
        #[error("unit tag `{tag}` is not in the conversion table")]
        InvalidUnit { tag: String },
        #[error("invalid argument: {0}")]
        InvalidArgument(String),
        #[error("segment length {requested} exceeds curve length {available}")]
        SegmentLengthTooLarge { requested: f64, available: f64 },
        #[error("degenerate geometry: {0}")]
        DegenerateGeometry(String),
        #[error("no downgrade path from {from} to {to}")]
        UnsupportedConversion {
            from: GeometryKind,
            to: GeometryKind,
        },
        #[error("no external primitive wired for composite kind {kind}")]
        PrimitiveUnavailable { kind: GeometryKind },
    }
}

pub mod resolution {
    use plotgeo_core::units::UnitTable;

    use crate::errors::ConvertError;

    /// 采样精度参数：段数与（段长，单位）二选一。
    /// 省略时（`Option::None`）由各组件使用自身的默认段数。
    #[derive(Debug, Clone, PartialEq)]
    pub enum Resolution {
        /// 期望的段数。
        Count(u32),
        /// 期望的单段长度，单位以符号形式给出，换算后才与规范单位坐标比较。
        Length { value: f64, unit: String },
    }

    impl Resolution {
        #[inline]
        pub fn count(count: u32) -> Self {
            Resolution::Count(count)
        }

        #[inline]
        pub fn length(value: f64, unit: impl Into<String>) -> Self {
            Resolution::Length {
                value,
                unit: unit.into(),
            }
        }

        /// 基本校验：段数与段长都必须为正。
        pub fn validate(&self) -> Result<(), ConvertError> {
            match self {
                Resolution::Count(0) => Err(ConvertError::InvalidArgument(
                    "segment count must be at least 1".to_string(),
                )),
                Resolution::Length { value, .. } if *value <= 0.0 => {
                    Err(ConvertError::InvalidArgument(format!(
                        "segment length must be positive, got {value}"
                    )))
                }
                _ => Ok(()),
            }
        }
    }

    /// 把以任意单位给出的长度换算为规范单位（微米）。
    pub fn canonical_length(
        units: &UnitTable,
        value: f64,
        unit: &str,
    ) -> Result<f64, ConvertError> {
        let factor = units
            .factor(unit)
            .ok_or_else(|| ConvertError::InvalidUnit {
                tag: unit.to_string(),
            })?;
        Ok(value * factor)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn canonical_length_applies_table_factor() {
            let units = UnitTable::new();
            let value = canonical_length(&units, 2.0, "mm").expect("mm is registered");
            assert!((value - 2_000.0).abs() < 1e-9);
        }

        #[test]
        fn canonical_length_round_trips_every_tag() {
            let units = UnitTable::new();
            for tag in units.tags() {
                let factor = units.factor(tag).unwrap();
                let value = 123.456;
                let forward = canonical_length(&units, value, tag).unwrap();
                assert!(
                    ((forward / factor) - value).abs() < 1e-9,
                    "round trip failed for {tag}"
                );
            }
        }

        #[test]
        fn unknown_tag_is_a_typed_error() {
            let units = UnitTable::new();
            let err = canonical_length(&units, 1.0, "cubit").unwrap_err();
            assert!(matches!(err, ConvertError::InvalidUnit { .. }));
        }

        #[test]
        fn validation_rejects_non_positive_parameters() {
            assert!(Resolution::count(1).validate().is_ok());
            assert!(Resolution::Count(0).validate().is_err());
            assert!(Resolution::length(0.5, "um").validate().is_ok());
            assert!(Resolution::length(0.0, "um").validate().is_err());
            assert!(Resolution::length(-3.0, "mm").validate().is_err());
        }
    }
}
