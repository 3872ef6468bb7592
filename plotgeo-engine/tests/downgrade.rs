use plotgeo_core::document::{Geometry, GeometryKind, GeometryList, Polyline, Spline};
use plotgeo_core::geometry::{Point3, Vector3};
use plotgeo_core::units::UnitTable;
use plotgeo_engine::convert::{
    BatchPolicy, ConvertOptions, Converter, PolylineExploder, SplineFlattener,
};
use plotgeo_engine::errors::ConvertError;
use plotgeo_engine::resolution::Resolution;
use plotgeo_engine::tessellate::DegeneratePolicy;

struct ControlPolygonFlattener;

impl SplineFlattener for ControlPolygonFlattener {
    fn flatten(&self, spline: &Spline) -> Result<Vec<Point3>, ConvertError> {
        Ok(spline.control_points.clone())
    }
}

struct StraightSegmentExploder;

impl PolylineExploder for StraightSegmentExploder {
    fn explode(&self, polyline: &Polyline) -> Result<Vec<Geometry>, ConvertError> {
        let mut pieces: Vec<Geometry> = polyline
            .vertices
            .windows(2)
            .map(|pair| {
                Geometry::Line(plotgeo_core::document::Line {
                    start: pair[0].position,
                    end: pair[1].position,
                })
            })
            .collect();
        if polyline.is_closed && polyline.vertices.len() > 2 {
            pieces.push(Geometry::Line(plotgeo_core::document::Line {
                start: polyline.vertices.last().unwrap().position,
                end: polyline.vertices[0].position,
            }));
        }
        Ok(pieces)
    }
}

/// 与演示程序同构的混合文档。
fn mixed_document() -> GeometryList {
    let mut list = GeometryList::new();
    list.add_line(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(50_000.0, 0.0, 0.0),
    );
    list.add_circle(Point3::new(25_000.0, 25_000.0, 0.0), 15_000.0);
    list.add_arc(Point3::new(0.0, 0.0, 0.0), 10_000.0, 0.0, 180.0);
    list.add_ellipse(
        Point3::new(-20_000.0, 0.0, 0.0),
        Vector3::new(25_000.0, 0.0, 0.0),
        0.6,
    );
    list
}

#[test]
fn mixed_document_downgrades_to_lines_deterministically() {
    let units = UnitTable::new();
    let list = mixed_document();
    let converter = Converter::new(&units).with_options(ConvertOptions {
        resolution: Some(Resolution::count(8)),
        ..ConvertOptions::default()
    });

    let first = converter.convert(&list, GeometryKind::Line).unwrap();
    let second = converter.convert(&list, GeometryKind::Line).unwrap();
    assert_eq!(first, second);

    // 直线条目在 LINE 目标下保持原样，圆与弧各自成弦，
    // 椭圆以默认段数先成弧再成弦。
    assert!(first.len() > list.len());
    let non_line = first
        .geometries()
        .find(|geometry| geometry.kind() != GeometryKind::Line);
    assert!(non_line.is_none(), "unexpected kind: {non_line:?}");
}

#[test]
fn full_pipeline_reaches_points_from_every_kind() {
    let units = UnitTable::new();
    let mut list = mixed_document();
    list.add_polyline(
        [
            plotgeo_core::document::PolylineVertex::new(Point3::new(0.0, 0.0, 0.0)),
            plotgeo_core::document::PolylineVertex::new(Point3::new(1_000.0, 0.0, 0.0)),
            plotgeo_core::document::PolylineVertex::new(Point3::new(1_000.0, 1_000.0, 0.0)),
        ],
        false,
    );
    list.add_spline(
        3,
        false,
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(500.0, 800.0, 0.0),
            Point3::new(1_000.0, 0.0, 0.0),
        ],
        vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        vec![1.0, 1.0, 1.0],
    );

    let flattener = ControlPolygonFlattener;
    let exploder = StraightSegmentExploder;
    let converter = Converter::new(&units)
        .with_options(ConvertOptions {
            resolution: Some(Resolution::count(4)),
            ..ConvertOptions::default()
        })
        .with_flattener(&flattener)
        .with_exploder(&exploder);

    let output = converter.convert(&list, GeometryKind::Point).unwrap();
    assert!(output.all_of_kind(GeometryKind::Point));
    // 输出编号自零连续递增，顺序与输入条目一致。
    let ids: Vec<u64> = output.items().map(|(id, _)| id.get()).collect();
    assert_eq!(ids, (0..output.len() as u64).collect::<Vec<u64>>());
}

#[test]
fn chord_length_resolution_crosses_unit_table() {
    let units = UnitTable::new();
    let mut list = GeometryList::new();
    list.add_circle(Point3::new(0.0, 0.0, 0.0), 10_000.0);

    // 1 mm 弦长与 1000 µm 弦长必须产生完全相同的切分。
    let in_mm = Converter::new(&units).with_options(ConvertOptions {
        resolution: Some(Resolution::length(1.0, "mm")),
        ..ConvertOptions::default()
    });
    let in_um = Converter::new(&units).with_options(ConvertOptions {
        resolution: Some(Resolution::length(1_000.0, "um")),
        ..ConvertOptions::default()
    });
    let from_mm = in_mm.convert(&list, GeometryKind::Line).unwrap();
    let from_um = in_um.convert(&list, GeometryKind::Line).unwrap();
    assert_eq!(from_mm, from_um);
    assert_eq!(from_mm.len(), 63);
}

#[test]
fn lenient_batch_reports_partial_results() {
    let units = UnitTable::new();
    let mut list = GeometryList::new();
    list.add_point(Point3::new(1.0, 1.0, 1.0));
    list.add_circle(Point3::new(0.0, 0.0, 0.0), 2_000.0);

    let converter = Converter::new(&units).with_options(ConvertOptions {
        resolution: Some(Resolution::count(8)),
        degenerate: DegeneratePolicy::Skip,
        batch: BatchPolicy::Skip,
    });
    let output = converter.convert(&list, GeometryKind::Line).unwrap();
    assert_eq!(output.len(), 8);
    assert!(output.all_of_kind(GeometryKind::Line));
}
