use std::f64::consts::TAU;

use plotgeo_core::document::{Arc, Geometry, Line, Point};
use plotgeo_core::geometry::{Point3, Vector3};
use plotgeo_core::units::UnitTable;
use tracing::warn;

use crate::errors::ConvertError;
use crate::resolution::{Resolution, canonical_length};

/// 直线离散的默认段数，未给出精度参数时使用。
pub const DEFAULT_LINE_SEGMENTS: u32 = 10;
/// 圆弧切分的默认段数。
pub const DEFAULT_ARC_SEGMENTS: u32 = 32;
/// 椭圆逼近的默认输出弧数。
pub const DEFAULT_ELLIPSE_SEGMENTS: u32 = 8;

/// 三点拟合的分母判零阈值（微米坐标下远高于浮点噪声）。
const FIT_EPS: f64 = 1e-9;

/// 椭圆逼近遇到退化三点组时的处理策略。
/// 该选择在来源语义中悬而未决，这里作为显式、可测试的参数暴露。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// 整次逼近以 `DegenerateGeometry` 失败（默认）。
    #[default]
    Fail,
    /// 丢弃退化的弧并告警，返回部分结果。
    Skip,
}

/// 把直线离散为等距点列。
///
/// `start == end` 的零长直线退化为单个起点；其余情形按水平 / 垂直 /
/// 一般斜率分类后沿相应坐标轴参数步进，一般情形由点斜式
/// `y = slope * x + intercept` 求出纵坐标。输出点自 `start` 朝 `end`
/// 方向排列，含起点不含终点，因此首尾相接的线段链不会产生重复顶点。
///
/// 段长超过直线长度属于可恢复情形：告警并回退到默认段数。
pub fn sample_line(
    start: Point3,
    end: Point3,
    resolution: Option<&Resolution>,
    units: &UnitTable,
) -> Result<Vec<Geometry>, ConvertError> {
    if start.vector_to(end).length_squared() <= f64::EPSILON {
        return Ok(vec![Geometry::Point(Point { position: start })]);
    }

    let count = match resolution {
        None => DEFAULT_LINE_SEGMENTS,
        Some(resolution) => {
            resolution.validate()?;
            match resolution {
                Resolution::Count(count) => *count,
                Resolution::Length { value, unit } => {
                    let requested = canonical_length(units, *value, unit)?;
                    let available = start.distance(end);
                    match count_from_length(requested, available) {
                        Ok(count) => count,
                        Err(ConvertError::SegmentLengthTooLarge {
                            requested,
                            available,
                        }) => {
                            warn!(
                                requested,
                                available,
                                fallback = DEFAULT_LINE_SEGMENTS,
                                "段长超过直线长度，回退到默认段数"
                            );
                            DEFAULT_LINE_SEGMENTS
                        }
                        Err(err) => return Err(err),
                    }
                }
            }
        }
    };

    let steps = count as f64;
    let dx = end.x() - start.x();
    let dy = end.y() - start.y();
    let dz = end.z() - start.z();
    let step_z = dz / steps;

    let mut points = Vec::with_capacity(count as usize);
    if dx.abs() <= f64::EPSILON && dy.abs() <= f64::EPSILON {
        // 仅沿 Z 变化的直线，退化为参数步进。
        for k in 0..count {
            let t = k as f64;
            points.push(Point3::new(start.x(), start.y(), start.z() + step_z * t));
        }
    } else if dy.abs() <= f64::EPSILON {
        // 水平：沿 X 轴等距步进。
        let step_x = dx / steps;
        for k in 0..count {
            let t = k as f64;
            points.push(Point3::new(
                start.x() + step_x * t,
                start.y(),
                start.z() + step_z * t,
            ));
        }
    } else if dx.abs() <= f64::EPSILON {
        // 垂直：沿 Y 轴等距步进。
        let step_y = dy / steps;
        for k in 0..count {
            let t = k as f64;
            points.push(Point3::new(
                start.x(),
                start.y() + step_y * t,
                start.z() + step_z * t,
            ));
        }
    } else {
        // 一般斜率：X 等距步进，Y 由点斜式求出。
        let slope = dy / dx;
        let intercept = start.y() - slope * start.x();
        let step_x = dx / steps;
        for k in 0..count {
            let t = k as f64;
            let x = start.x() + step_x * t;
            points.push(Point3::new(x, slope * x + intercept, start.z() + step_z * t));
        }
    }

    Ok(points
        .into_iter()
        .map(|position| Geometry::Point(Point { position }))
        .collect())
}

/// 把圆弧（或整圆）切分为首尾相接的弦。
///
/// 给定段数时段角取 `sweep / count`；给定段长时按小角度近似
/// `segment_angle = (len / (2π·radius)) · 360` 推出段角并向下取整得到
/// 段数。该近似以弧长代替弦长，切分误差为 O(segment_angle²)，刻意
/// 保留以维持下游既有的容差预期。
///
/// 闭合规则：`sweep == 360` 精确成立时在末尾补一条回到首顶点的收尾弦，
/// 形成无重合顶点的闭合多边形。段角整除整圈时末样本与首样本重合，
/// 丢弃后恰好产生 `count` 条线；按段长推出的段角通常除不尽，收尾弦
/// 跨越剩余角度。闭合切分要求 `count >= 3`。
/// 开弧采样 `count + 1` 个点得到 `count` 条弦，自起始角逆时针排列。
pub fn tessellate_arc(
    center: Point3,
    radius: f64,
    start_angle_deg: f64,
    end_angle_deg: f64,
    resolution: Option<&Resolution>,
    units: &UnitTable,
) -> Result<Vec<Geometry>, ConvertError> {
    let sweep = end_angle_deg - start_angle_deg;
    if sweep <= 0.0 {
        return Err(ConvertError::InvalidArgument(format!(
            "arc sweep must be positive, got {sweep}"
        )));
    }
    if radius <= f64::EPSILON {
        return Err(ConvertError::DegenerateGeometry(format!(
            "arc radius must be positive, got {radius}"
        )));
    }
    let closed = sweep == 360.0;

    let (count, segment_angle) = match resolution {
        None => (DEFAULT_ARC_SEGMENTS, sweep / DEFAULT_ARC_SEGMENTS as f64),
        Some(resolution) => {
            resolution.validate()?;
            match resolution {
                Resolution::Count(count) => (*count, sweep / *count as f64),
                Resolution::Length { value, unit } => {
                    let requested = canonical_length(units, *value, unit)?;
                    match segmentation_from_chord(requested, radius, sweep) {
                        Ok(pair) => pair,
                        Err(ConvertError::SegmentLengthTooLarge {
                            requested,
                            available,
                        }) => {
                            warn!(
                                requested,
                                available,
                                fallback = DEFAULT_ARC_SEGMENTS,
                                "段长超过弧长，回退到默认段数"
                            );
                            (DEFAULT_ARC_SEGMENTS, sweep / DEFAULT_ARC_SEGMENTS as f64)
                        }
                        Err(err) => return Err(err),
                    }
                }
            }
        }
    };
    if closed && count < 3 {
        return Err(ConvertError::InvalidArgument(format!(
            "closed sweep needs at least 3 segments, got {count}"
        )));
    }

    // 段角整除跨度时，第 count 个样本与首样本重合，予以丢弃。
    let divides_exactly = (segment_angle * count as f64 - sweep).abs() <= 1e-9;
    let vertex_count = if closed && divides_exactly {
        count
    } else {
        count + 1
    };
    let mut points = Vec::with_capacity(vertex_count as usize);
    for k in 0..vertex_count {
        let angle = (start_angle_deg + segment_angle * k as f64).to_radians();
        points.push(Point3::new(
            center.x() + radius * angle.cos(),
            center.y() + radius * angle.sin(),
            center.z(),
        ));
    }

    let mut lines = Vec::with_capacity(count as usize);
    for pair in points.windows(2) {
        lines.push(Geometry::Line(Line {
            start: pair[0],
            end: pair[1],
        }));
    }
    if closed {
        lines.push(Geometry::Line(Line {
            start: *points.last().expect("closed arc has vertices"),
            end: points[0],
        }));
    }
    Ok(lines)
}

/// 由期望段长推出直线的段数。
fn count_from_length(requested: f64, available: f64) -> Result<u32, ConvertError> {
    if requested > available {
        return Err(ConvertError::SegmentLengthTooLarge {
            requested,
            available,
        });
    }
    Ok((available / requested).floor().max(1.0) as u32)
}

/// 由期望弦长推出（段数，段角）。
fn segmentation_from_chord(
    requested: f64,
    radius: f64,
    sweep: f64,
) -> Result<(u32, f64), ConvertError> {
    let available = TAU * radius * sweep / 360.0;
    if requested > available {
        return Err(ConvertError::SegmentLengthTooLarge {
            requested,
            available,
        });
    }
    let segment_angle = requested / (TAU * radius) * 360.0;
    let count = (sweep / segment_angle).floor().max(1.0) as u32;
    Ok((count, segment_angle))
}

/// 把椭圆逼近为一串端点相接的圆弧（C0 连续的分段圆样条，每段弧独立
/// 拟合自己的圆心与半径）。
///
/// 以极径公式 `r(θ) = a·b / sqrt((b·cosθ)² + (a·sinθ)²)` 按
/// `step = 180° / segment_count` 采样 `2·segment_count` 个点，相邻重叠的
/// 三点组分别给出每段弧的起点、中点与终点样本，再过三点拟合外接圆。
/// 输出恰为 `segment_count` 段弧（`Skip` 策略下可能少于该数）。
pub fn approximate_ellipse(
    center: Point3,
    major_axis: Vector3,
    ratio: f64,
    segment_count: u32,
    policy: DegeneratePolicy,
) -> Result<Vec<Geometry>, ConvertError> {
    if segment_count < 1 {
        return Err(ConvertError::InvalidArgument(
            "ellipse approximation needs at least 1 segment".to_string(),
        ));
    }
    let a = major_axis.length();
    if a <= f64::EPSILON {
        return Err(ConvertError::DegenerateGeometry(
            "ellipse major axis has zero length".to_string(),
        ));
    }
    let b = a * ratio.abs();
    if b <= f64::EPSILON {
        return Err(ConvertError::DegenerateGeometry(format!(
            "ellipse minor axis vanishes for ratio {ratio}"
        )));
    }

    let step = 180.0 / segment_count as f64;
    let sample_count = 2 * segment_count as usize;
    let mut samples = Vec::with_capacity(sample_count);
    for i in 0..sample_count {
        let theta = (step * i as f64).to_radians();
        let (sin, cos) = theta.sin_cos();
        let r = a * b / ((b * cos).powi(2) + (a * sin).powi(2)).sqrt();
        samples.push(Point3::new(
            center.x() + r * cos,
            center.y() + r * sin,
            center.z(),
        ));
    }

    let mut arcs = Vec::with_capacity(segment_count as usize);
    for k in 0..segment_count as usize {
        let p1 = samples[2 * k];
        let p2 = samples[2 * k + 1];
        let p3 = samples[(2 * k + 2) % sample_count];
        match fit_circle(p1, p2, p3) {
            Ok((cx, cy, radius)) => {
                // atan2 保证象限正确；终点角按逆时针跨越补全一圈。
                let start_angle_deg = (p1.y() - cy).atan2(p1.x() - cx).to_degrees();
                let mut end_angle_deg = (p3.y() - cy).atan2(p3.x() - cx).to_degrees();
                if end_angle_deg <= start_angle_deg {
                    end_angle_deg += 360.0;
                }
                arcs.push(Geometry::Arc(Arc {
                    center: Point3::new(cx, cy, center.z()),
                    radius,
                    start_angle_deg,
                    end_angle_deg,
                }));
            }
            Err(err) => match policy {
                DegeneratePolicy::Fail => return Err(err),
                DegeneratePolicy::Skip => {
                    warn!(segment = k, error = %err, "退化三点组，按策略丢弃该段弧");
                }
            },
        }
    }
    Ok(arcs)
}

/// 过三点拟合外接圆，返回 `(cx, cy, radius)`。
///
/// 公式对 `2·p1.y - 2·p3.y` 取商，样本共线或近共线时分母消失；
/// 此处显式判零并转为类型化错误，绝不依赖运行期浮点异常。
fn fit_circle(p1: Point3, p2: Point3, p3: Point3) -> Result<(f64, f64, f64), ConvertError> {
    let (p1, p2, p3) = (p1.xy(), p2.xy(), p3.xy());
    let (x1, y1) = (p1.x, p1.y);
    let (x2, y2) = (p2.x, p2.y);
    let (x3, y3) = (p3.x, p3.y);

    let dy13 = 2.0 * y1 - 2.0 * y3;
    if dy13.abs() <= FIT_EPS {
        return Err(ConvertError::DegenerateGeometry(format!(
            "circle fit denominator vanishes (p1.y {y1} ~= p3.y {y3})"
        )));
    }

    let sq1 = x1 * x1 + y1 * y1;
    let sq2 = x2 * x2 + y2 * y2;
    let sq3 = x3 * x3 + y3 * y3;
    let dy12 = 2.0 * y1 - 2.0 * y2;
    let dx12 = 2.0 * x1 - 2.0 * x2;
    let dx13 = 2.0 * x1 - 2.0 * x3;

    let denominator = dx12 - dy12 * dx13 / dy13;
    if denominator.abs() <= FIT_EPS {
        return Err(ConvertError::DegenerateGeometry(
            "collinear sample triple in circle fit".to_string(),
        ));
    }

    let cx = ((sq1 - sq2) - dy12 * (sq1 - sq3) / dy13) / denominator;
    let cy = (sq1 - sq3) / dy13 - cx * dx13 / dy13;
    let radius = ((x1 - cx).powi(2) + (y1 - cy).powi(2)).sqrt();
    Ok((cx, cy, radius))
}
