use plotgeo_config::{BatchMode, ConversionConfig, DegenerateMode, TargetKind};
use plotgeo_core::document::{
    Geometry, GeometryKind, GeometryList, Line, Polyline, PolylineVertex, Spline,
};
use plotgeo_core::geometry::{Point3, Vector3};
use plotgeo_core::units::UnitTable;
use plotgeo_engine::convert::{
    BatchPolicy, ConvertOptions, Converter, PolylineExploder, SplineFlattener,
};
use plotgeo_engine::errors::ConvertError;
use plotgeo_engine::resolution::Resolution;
use plotgeo_engine::tessellate::DegeneratePolicy;
use tracing::{debug, info};

/// 演示用样条展平：按控制多边形连线。
/// 真实部署时由外部 NURBS 求值器替换。
struct ControlPolygonFlattener;

impl SplineFlattener for ControlPolygonFlattener {
    fn flatten(&self, spline: &Spline) -> Result<Vec<Point3>, ConvertError> {
        Ok(spline.control_points.clone())
    }
}

/// 演示用多段线展开：顶点间直连，忽略凸度。
/// 凸度到圆弧的转换由外部展开原语负责。
struct StraightSegmentExploder;

impl PolylineExploder for StraightSegmentExploder {
    fn explode(&self, polyline: &Polyline) -> Result<Vec<Geometry>, ConvertError> {
        let mut pieces: Vec<Geometry> = polyline
            .vertices
            .windows(2)
            .map(|pair| {
                Geometry::Line(Line {
                    start: pair[0].position,
                    end: pair[1].position,
                })
            })
            .collect();
        if polyline.is_closed && polyline.vertices.len() > 2 {
            pieces.push(Geometry::Line(Line {
                start: polyline.vertices.last().expect("closed polyline").position,
                end: polyline.vertices[0].position,
            }));
        }
        Ok(pieces)
    }
}

/// 填充一组演示实体，坐标为微米。
fn populate_demo() -> GeometryList {
    let mut list = GeometryList::new();
    list.add_line(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(50_000.0, 0.0, 0.0),
    );
    list.add_circle(Point3::new(25_000.0, 25_000.0, 0.0), 15_000.0);
    list.add_arc(Point3::new(0.0, -10_000.0, 0.0), 10_000.0, 0.0, 180.0);
    list.add_ellipse(
        Point3::new(-30_000.0, 0.0, 0.0),
        Vector3::new(25_000.0, 0.0, 0.0),
        0.6,
    );
    list.add_polyline(
        [
            PolylineVertex::new(Point3::new(0.0, 10_000.0, 0.0)),
            PolylineVertex::new(Point3::new(10_000.0, 20_000.0, 0.0)),
            PolylineVertex::new(Point3::new(25_000.0, 5_000.0, 0.0)),
        ],
        false,
    );
    list.add_spline(
        3,
        false,
        vec![
            Point3::new(-10_000.0, -10_000.0, 0.0),
            Point3::new(-5_000.0, -2_000.0, 0.0),
            Point3::new(0.0, -10_000.0, 0.0),
        ],
        vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        vec![1.0, 1.0, 1.0],
    );
    list
}

fn target_kind(target: TargetKind) -> GeometryKind {
    match target {
        TargetKind::Point => GeometryKind::Point,
        TargetKind::Line => GeometryKind::Line,
        TargetKind::Arc => GeometryKind::Arc,
    }
}

fn census(list: &GeometryList) -> String {
    let counts = list.kind_counts();
    let mut kinds: Vec<_> = counts.iter().collect();
    kinds.sort_by_key(|(kind, _)| kind.name());
    kinds
        .iter()
        .map(|(kind, count)| format!("{kind}×{count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// 运行一次完整的演示转换并记录统计。
pub fn run(conversion: &ConversionConfig) -> Result<(), ConvertError> {
    let units = UnitTable::new();
    let list = populate_demo();

    info!(items = list.len(), census = %census(&list), "演示文档就绪");
    if let Some(bounds) = list.bounds() {
        debug!(
            min_x = bounds.min().x(),
            min_y = bounds.min().y(),
            max_x = bounds.max().x(),
            max_y = bounds.max().y(),
            "文档范围（微米）"
        );
    }

    let resolution = if let Some(count) = conversion.segment_count {
        Some(Resolution::count(count))
    } else if let Some(length) = conversion.segment_length {
        Some(Resolution::length(length, conversion.unit.clone()))
    } else {
        None
    };
    let options = ConvertOptions {
        resolution,
        degenerate: match conversion.degenerate {
            DegenerateMode::Fail => DegeneratePolicy::Fail,
            DegenerateMode::Skip => DegeneratePolicy::Skip,
        },
        batch: match conversion.batch {
            BatchMode::Abort => BatchPolicy::Abort,
            BatchMode::Skip => BatchPolicy::Skip,
        },
    };

    let flattener = ControlPolygonFlattener;
    let exploder = StraightSegmentExploder;
    let converter = Converter::new(&units)
        .with_options(options)
        .with_flattener(&flattener)
        .with_exploder(&exploder);

    let target = target_kind(conversion.target);
    let output = converter.convert(&list, target)?;

    info!(
        target = %target,
        items = output.len(),
        census = %census(&output),
        "转换完成"
    );
    Ok(())
}
