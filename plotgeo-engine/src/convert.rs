use plotgeo_core::document::{Geometry, GeometryKind, GeometryList, Line, Polyline, Spline};
use plotgeo_core::geometry::Point3;
use plotgeo_core::units::UnitTable;
use tracing::{debug, warn};

use crate::errors::ConvertError;
use crate::resolution::Resolution;
use crate::tessellate::{self, DEFAULT_ELLIPSE_SEGMENTS, DegeneratePolicy};

/// 样条展平原语的契约：给定样条参数，按既定精度返回折线顶点。
/// NURBS 求值本身不在本引擎内实现。
pub trait SplineFlattener {
    fn flatten(&self, spline: &Spline) -> Result<Vec<Point3>, ConvertError>;
}

/// 多段线展开原语的契约：把带凸度的多段线拆成基本的弧 / 线实体。
/// 凸度到圆弧的数学不在本引擎内实现。
pub trait PolylineExploder {
    fn explode(&self, polyline: &Polyline) -> Result<Vec<Geometry>, ConvertError>;
}

/// 批量转换中单个条目失败时的处理策略。
/// 该选择在来源语义中悬而未决，这里作为显式、可测试的参数暴露。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// 整批转换以该条目的错误终止（默认）。
    #[default]
    Abort,
    /// 告警并丢弃失败条目，继续处理其余条目。
    Skip,
}

/// 调度器的运行参数。
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// 采样精度；省略时各组件使用自身默认段数。
    pub resolution: Option<Resolution>,
    /// 椭圆逼近的退化三点组策略。
    pub degenerate: DegeneratePolicy,
    /// 批量转换的失败条目策略。
    pub batch: BatchPolicy,
}

/// 转换调度器：沿固定降级格 ELLIPSE → ARC → LINE → POINT 链接单步转换，
/// 复合种类 LWPOLYLINE / SPLINE 先经外部原语展开再进入格内。
///
/// 调度器本身无状态可变量，相同输入与参数产生完全一致的输出。
pub struct Converter<'a> {
    units: &'a UnitTable,
    options: ConvertOptions,
    flattener: Option<&'a dyn SplineFlattener>,
    exploder: Option<&'a dyn PolylineExploder>,
}

impl<'a> Converter<'a> {
    pub fn new(units: &'a UnitTable) -> Self {
        Self {
            units,
            options: ConvertOptions::default(),
            flattener: None,
            exploder: None,
        }
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_flattener(mut self, flattener: &'a dyn SplineFlattener) -> Self {
        self.flattener = Some(flattener);
        self
    }

    pub fn with_exploder(mut self, exploder: &'a dyn PolylineExploder) -> Self {
        self.exploder = Some(exploder);
        self
    }

    /// 把列表降级到目标种类。
    ///
    /// 与目标同种的列表恒等返回；无法到达目标的条目以
    /// `UnsupportedConversion` 显式失败，绝不悄悄返回空结果。
    /// 输出列表按输入顺序重新编号，顺序保持稳定。
    pub fn convert(
        &self,
        list: &GeometryList,
        target: GeometryKind,
    ) -> Result<GeometryList, ConvertError> {
        if list.all_of_kind(target) {
            return Ok(list.clone());
        }

        let mut output = GeometryList::new();
        for (id, geometry) in list.items() {
            match self.reduce_item(geometry, target) {
                Ok(pieces) => {
                    debug!(
                        item = id.get(),
                        from = %geometry.kind(),
                        to = %target,
                        pieces = pieces.len(),
                        "条目降级完成"
                    );
                    for piece in pieces {
                        output.add_geometry(piece);
                    }
                }
                Err(err) => match self.options.batch {
                    BatchPolicy::Abort => return Err(err),
                    BatchPolicy::Skip => {
                        warn!(item = id.get(), error = %err, "条目转换失败，按策略跳过");
                    }
                },
            }
        }
        Ok(output)
    }

    /// 降级格上的可达性判定。复合种类经外部原语进入格内。
    fn reachable(from: GeometryKind, to: GeometryKind) -> bool {
        if from == to {
            return true;
        }
        match from {
            GeometryKind::Polyline => matches!(
                to,
                GeometryKind::Arc | GeometryKind::Line | GeometryKind::Point
            ),
            GeometryKind::Spline => matches!(to, GeometryKind::Line | GeometryKind::Point),
            _ => {
                let mut kind = from;
                while let Some(next) = kind.downgrade() {
                    if next == to {
                        return true;
                    }
                    kind = next;
                }
                false
            }
        }
    }

    /// 单步降级后递归，直到条目达到目标种类。
    fn reduce_item(
        &self,
        geometry: &Geometry,
        target: GeometryKind,
    ) -> Result<Vec<Geometry>, ConvertError> {
        let kind = geometry.kind();
        if kind == target {
            return Ok(vec![geometry.clone()]);
        }
        if !Self::reachable(kind, target) {
            return Err(ConvertError::UnsupportedConversion {
                from: kind,
                to: target,
            });
        }

        let mut result = Vec::new();
        for piece in self.reduce_once(geometry)? {
            let piece_kind = piece.kind();
            if piece_kind == target || !Self::reachable(piece_kind, target) {
                // 复合实体展开出的条目可能已低于目标种类（多段线里的直线段
                // 无法升格为圆弧），这类条目原样保留。
                result.push(piece);
            } else {
                result.extend(self.reduce_item(&piece, target)?);
            }
        }
        Ok(result)
    }

    /// 执行降级格允许的那一步转换。
    fn reduce_once(&self, geometry: &Geometry) -> Result<Vec<Geometry>, ConvertError> {
        let resolution = self.options.resolution.as_ref();
        match geometry {
            Geometry::Point(point) => Ok(vec![Geometry::Point(*point)]),
            Geometry::Line(line) => {
                tessellate::sample_line(line.start, line.end, resolution, self.units)
            }
            Geometry::Arc(arc) => tessellate::tessellate_arc(
                arc.center,
                arc.radius,
                arc.start_angle_deg,
                arc.end_angle_deg,
                resolution,
                self.units,
            ),
            Geometry::Ellipse(ellipse) => {
                // 椭圆逼近只接受段数；给定段长时使用默认弧数。
                let count = match resolution {
                    Some(Resolution::Count(count)) => *count,
                    _ => DEFAULT_ELLIPSE_SEGMENTS,
                };
                tessellate::approximate_ellipse(
                    ellipse.center,
                    ellipse.major_axis,
                    ellipse.ratio,
                    count,
                    self.options.degenerate,
                )
            }
            Geometry::Polyline(polyline) => {
                let exploder = self.exploder.ok_or(ConvertError::PrimitiveUnavailable {
                    kind: GeometryKind::Polyline,
                })?;
                exploder.explode(polyline)
            }
            Geometry::Spline(spline) => {
                let flattener = self.flattener.ok_or(ConvertError::PrimitiveUnavailable {
                    kind: GeometryKind::Spline,
                })?;
                let vertices = flattener.flatten(spline)?;
                let mut lines: Vec<Geometry> = vertices
                    .windows(2)
                    .map(|pair| {
                        Geometry::Line(Line {
                            start: pair[0],
                            end: pair[1],
                        })
                    })
                    .collect();
                if spline.is_closed && vertices.len() > 2 {
                    lines.push(Geometry::Line(Line {
                        start: *vertices.last().expect("non-empty flattened polyline"),
                        end: vertices[0],
                    }));
                }
                Ok(lines)
            }
        }
    }
}
