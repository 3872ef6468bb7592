pub mod geometry {
    use glam::{DVec2, DVec3};
    use serde::{Deserialize, Serialize};

    /// 三维点，内部以 `glam::DVec3` 表示，坐标一律为规范单位（微米）。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Point3(pub DVec3);

    impl Point3 {
        #[inline]
        pub fn new(x: f64, y: f64, z: f64) -> Self {
            Self(DVec3::new(x, y, z))
        }

        #[inline]
        pub fn from_vec(vec: DVec3) -> Self {
            Self(vec)
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn y(self) -> f64 {
            self.0.y
        }

        #[inline]
        pub fn z(self) -> f64 {
            self.0.z
        }

        #[inline]
        pub fn translate(self, offset: Vector3) -> Self {
            Self(self.0 + offset.0)
        }

        #[inline]
        pub fn vector_to(self, other: Point3) -> Vector3 {
            Vector3(other.0 - self.0)
        }

        #[inline]
        pub fn distance(self, other: Point3) -> f64 {
            self.0.distance(other.0)
        }

        #[inline]
        pub fn as_vec3(self) -> DVec3 {
            self.0
        }

        /// 投影到 XY 平面，采样与拟合计算只发生在该平面内。
        #[inline]
        pub fn xy(self) -> DVec2 {
            DVec2::new(self.0.x, self.0.y)
        }
    }

    impl From<DVec3> for Point3 {
        fn from(value: DVec3) -> Self {
            Self::from_vec(value)
        }
    }

    /// 三维向量。提供基础运算，椭圆主轴等方向量使用该类型。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Vector3(pub DVec3);

    impl Vector3 {
        #[inline]
        pub fn new(x: f64, y: f64, z: f64) -> Self {
            Self(DVec3::new(x, y, z))
        }

        #[inline]
        pub fn from_points(start: Point3, end: Point3) -> Self {
            Self(end.0 - start.0)
        }

        #[inline]
        pub fn length(self) -> f64 {
            self.0.length()
        }

        #[inline]
        pub fn length_squared(self) -> f64 {
            self.0.length_squared()
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn y(self) -> f64 {
            self.0.y
        }

        #[inline]
        pub fn z(self) -> f64 {
            self.0.z
        }

        #[inline]
        pub fn as_vec3(self) -> DVec3 {
            self.0
        }
    }

    impl From<DVec3> for Vector3 {
        fn from(value: DVec3) -> Self {
            Self(value)
        }
    }

    /// 轴对齐三维边界框，用于估算几何列表范围。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Bounds3D {
        min: Point3,
        max: Point3,
    }

    impl Bounds3D {
        #[inline]
        pub fn new(min: Point3, max: Point3) -> Self {
            Self { min, max }
        }

        #[inline]
        pub fn empty() -> Self {
            Self {
                min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
                max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            }
        }

        #[inline]
        pub fn is_empty(&self) -> bool {
            self.min.x() > self.max.x()
                || self.min.y() > self.max.y()
                || self.min.z() > self.max.z()
        }

        #[inline]
        pub fn min(&self) -> Point3 {
            self.min
        }

        #[inline]
        pub fn max(&self) -> Point3 {
            self.max
        }

        pub fn include_point(&mut self, point: Point3) {
            if self.is_empty() {
                self.min = point;
                self.max = point;
                return;
            }
            let min_vec = self.min.as_vec3().min(point.as_vec3());
            let max_vec = self.max.as_vec3().max(point.as_vec3());
            self.min = Point3::from_vec(min_vec);
            self.max = Point3::from_vec(max_vec);
        }

        pub fn include_bounds(&mut self, other: &Bounds3D) {
            if other.is_empty() {
                return;
            }
            self.include_point(other.min);
            self.include_point(other.max);
        }

        #[inline]
        pub fn center(&self) -> Point3 {
            debug_assert!(!self.is_empty());
            let center = (self.min.as_vec3() + self.max.as_vec3()) * 0.5;
            Point3::from_vec(center)
        }
    }
}

pub mod units {
    use serde::{Deserialize, Serialize};

    /// 规范长度单位的符号（微米）。
    pub const CANONICAL_UNIT: &str = "um";

    /// 固定单位表：符号 → 规范单位换算系数，
    /// `规范单位值 = 原单位值 * 系数`，以微米 = 1.0 为锚点。
    /// 顺序沿用 DXF 单位编号的排列，覆盖公制、英制、天文与美制测量单位。
    const STANDARD_ENTRIES: [(&str, f64); 24] = [
        ("in", 25_400.0),
        ("ft", 304_800.0),
        ("mi", 1.609_344e9),
        ("mm", 1.0e3),
        ("cm", 1.0e4),
        ("m", 1.0e6),
        ("km", 1.0e9),
        ("ui", 2.54e-2),
        ("mil", 25.4),
        ("yd", 914_400.0),
        ("a", 1.0e-4),
        ("nm", 1.0e-3),
        ("um", 1.0),
        ("dm", 1.0e5),
        ("dam", 1.0e7),
        ("hm", 1.0e8),
        ("gm", 1.0e15),
        ("au", 1.495_978_707e17),
        ("ly", 9.460_730_472_580_8e21),
        ("pc", 3.085_677_581_491_367_3e22),
        ("usft", 304_800.609_601_219_2),
        ("usin", 25_400.050_800_101_6),
        ("usyd", 914_401.828_803_657_6),
        ("usmi", 1.609_347_218_694_437_3e9),
    ];

    /// 只读单位换算表。进程启动时构建一次，通过引用注入各组件。
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct UnitTable {
        entries: Vec<(String, f64)>,
    }

    impl UnitTable {
        /// 构建标准单位表。
        pub fn new() -> Self {
            Self {
                entries: STANDARD_ENTRIES
                    .iter()
                    .map(|(tag, factor)| (tag.to_string(), *factor))
                    .collect(),
            }
        }

        /// 查询换算系数。符号未登记时返回 None，由调用方映射为类型化错误。
        pub fn factor(&self, tag: &str) -> Option<f64> {
            self.entries
                .iter()
                .find(|(entry, _)| entry == tag)
                .map(|(_, factor)| *factor)
        }

        /// 按表内顺序列出全部单位符号。
        #[inline]
        pub fn tags(&self) -> impl Iterator<Item = &str> {
            self.entries.iter().map(|(tag, _)| tag.as_str())
        }

        #[inline]
        pub fn len(&self) -> usize {
            self.entries.len()
        }

        #[inline]
        pub fn is_empty(&self) -> bool {
            self.entries.is_empty()
        }
    }

    impl Default for UnitTable {
        fn default() -> Self {
            Self::new()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn canonical_unit_is_anchor() {
            let table = UnitTable::new();
            assert_eq!(table.len(), 24);
            assert_eq!(table.factor(CANONICAL_UNIT), Some(1.0));
        }

        #[test]
        fn lookup_known_and_unknown_tags() {
            let table = UnitTable::new();
            assert_eq!(table.factor("mm"), Some(1.0e3));
            assert_eq!(table.factor("in"), Some(25_400.0));
            assert_eq!(table.factor("furlong"), None);
            assert_eq!(table.factor(""), None);
        }

        #[test]
        fn tags_preserve_table_order() {
            let table = UnitTable::new();
            let tags: Vec<_> = table.tags().collect();
            assert_eq!(tags[0], "in");
            assert_eq!(tags[12], "um");
            assert_eq!(tags[23], "usmi");
        }
    }
}

pub mod document {
    use std::collections::HashMap;
    use std::f64::consts::TAU;

    use glam::DVec2;
    use serde::{Deserialize, Serialize};

    use crate::geometry::{Bounds3D, Point3, Vector3};

    /// 几何条目的稳定编号，列表内按插入顺序递增。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct GeometryId(u64);

    impl GeometryId {
        #[inline]
        pub fn new(raw: u64) -> Self {
            Self(raw)
        }

        /// 提供原始数值，便于序列化或日志输出。
        #[inline]
        pub fn get(self) -> u64 {
            self.0
        }
    }

    /// 几何种类标签，降级格即建立在该枚举之上。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum GeometryKind {
        Point,
        Line,
        Arc,
        Ellipse,
        Polyline,
        Spline,
    }

    impl GeometryKind {
        /// 降级格中允许的单步降级目标。复合种类（Polyline/Spline）
        /// 经由外部展开原语进入格内，不在此处表达。
        #[inline]
        pub fn downgrade(self) -> Option<GeometryKind> {
            match self {
                GeometryKind::Ellipse => Some(GeometryKind::Arc),
                GeometryKind::Arc => Some(GeometryKind::Line),
                GeometryKind::Line => Some(GeometryKind::Point),
                GeometryKind::Point | GeometryKind::Polyline | GeometryKind::Spline => None,
            }
        }

        /// 人类可读名称，用于日志与错误消息。
        pub fn name(self) -> &'static str {
            match self {
                GeometryKind::Point => "POINT",
                GeometryKind::Line => "LINE",
                GeometryKind::Arc => "ARC",
                GeometryKind::Ellipse => "ELLIPSE",
                GeometryKind::Polyline => "LWPOLYLINE",
                GeometryKind::Spline => "SPLINE",
            }
        }
    }

    impl std::fmt::Display for GeometryKind {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.name())
        }
    }

    /// 几何条目。一旦产生即不可变，变换总是生成新列表。
    ///
    /// 角度一律以度为单位并沿逆时针正方向；圆以 0–360 度的 Arc 表示，
    /// `end - start == 360` 是约定的整圈闭合信号，而非回绕运算。
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub enum Geometry {
        Point(Point),
        Line(Line),
        Arc(Arc),
        Ellipse(Ellipse),
        Polyline(Polyline),
        Spline(Spline),
    }

    impl Geometry {
        #[inline]
        pub fn kind(&self) -> GeometryKind {
            match self {
                Geometry::Point(_) => GeometryKind::Point,
                Geometry::Line(_) => GeometryKind::Line,
                Geometry::Arc(_) => GeometryKind::Arc,
                Geometry::Ellipse(_) => GeometryKind::Ellipse,
                Geometry::Polyline(_) => GeometryKind::Polyline,
                Geometry::Spline(_) => GeometryKind::Spline,
            }
        }

        /// 计算条目的轴对齐范围，样条退化为控制点包络。
        pub fn bounds(&self) -> Option<Bounds3D> {
            let mut bounds = Bounds3D::empty();
            match self {
                Geometry::Point(point) => {
                    bounds.include_point(point.position);
                }
                Geometry::Line(line) => {
                    bounds.include_point(line.start);
                    bounds.include_point(line.end);
                }
                Geometry::Arc(arc) => {
                    arc_bounds(arc, &mut bounds);
                }
                Geometry::Ellipse(ellipse) => {
                    ellipse_bounds(ellipse, &mut bounds);
                }
                Geometry::Polyline(polyline) => {
                    for vertex in &polyline.vertices {
                        bounds.include_point(vertex.position);
                    }
                }
                Geometry::Spline(spline) => {
                    for point in &spline.control_points {
                        bounds.include_point(*point);
                    }
                }
            }
            if bounds.is_empty() { None } else { Some(bounds) }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Point {
        pub position: Point3,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Line {
        pub start: Point3,
        pub end: Point3,
    }

    /// 圆弧实体，角度以度储存，遵循数学正方向。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Arc {
        pub center: Point3,
        pub radius: f64,
        pub start_angle_deg: f64,
        pub end_angle_deg: f64,
    }

    impl Arc {
        /// 角度跨度（度）。
        #[inline]
        pub fn sweep(&self) -> f64 {
            self.end_angle_deg - self.start_angle_deg
        }

        /// 是否为约定的整圈闭合弧。
        #[inline]
        pub fn is_full_circle(&self) -> bool {
            self.sweep() == 360.0
        }
    }

    /// 椭圆实体。`major_axis` 为圆心指向主轴端点的向量，
    /// `ratio` 是短轴与主轴的比值。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Ellipse {
        pub center: Point3,
        pub major_axis: Vector3,
        pub ratio: f64,
    }

    impl Ellipse {
        /// 主轴半径。
        #[inline]
        pub fn major_radius(&self) -> f64 {
            self.major_axis.length()
        }

        /// 短轴半径。
        #[inline]
        pub fn minor_radius(&self) -> f64 {
            self.major_radius() * self.ratio.abs()
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct PolylineVertex {
        pub position: Point3,
        pub bulge: f64,
    }

    impl PolylineVertex {
        #[inline]
        pub fn new(position: Point3) -> Self {
            Self {
                position,
                bulge: 0.0,
            }
        }

        #[inline]
        pub fn with_bulge(position: Point3, bulge: f64) -> Self {
            Self { position, bulge }
        }
    }

    /// 复合实体：带凸度的轻量多段线。凸度到圆弧的数学由外部展开原语负责。
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Polyline {
        pub vertices: Vec<PolylineVertex>,
        pub is_closed: bool,
    }

    /// 复合实体：样条。NURBS 求值由外部展平原语负责，本核心只保存参数。
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Spline {
        pub degree: i32,
        pub is_closed: bool,
        pub control_points: Vec<Point3>,
        pub knots: Vec<f64>,
        pub weights: Vec<f64>,
    }

    /// 有序几何列表。插入顺序即输出顺序，编号随插入递增且保持稳定。
    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    pub struct GeometryList {
        items: Vec<(GeometryId, Geometry)>,
        next_id: u64,
    }

    impl GeometryList {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_point(&mut self, position: Point3) -> GeometryId {
            self.add_geometry(Geometry::Point(Point { position }))
        }

        pub fn add_line(&mut self, start: Point3, end: Point3) -> GeometryId {
            self.add_geometry(Geometry::Line(Line { start, end }))
        }

        pub fn add_arc(
            &mut self,
            center: Point3,
            radius: f64,
            start_angle_deg: f64,
            end_angle_deg: f64,
        ) -> GeometryId {
            self.add_geometry(Geometry::Arc(Arc {
                center,
                radius,
                start_angle_deg,
                end_angle_deg,
            }))
        }

        /// 圆按整圈弧（0–360 度）登记。
        pub fn add_circle(&mut self, center: Point3, radius: f64) -> GeometryId {
            self.add_arc(center, radius, 0.0, 360.0)
        }

        pub fn add_ellipse(
            &mut self,
            center: Point3,
            major_axis: Vector3,
            ratio: f64,
        ) -> GeometryId {
            self.add_geometry(Geometry::Ellipse(Ellipse {
                center,
                major_axis,
                ratio,
            }))
        }

        pub fn add_polyline<I>(&mut self, vertices: I, is_closed: bool) -> GeometryId
        where
            I: IntoIterator<Item = PolylineVertex>,
        {
            let vertices = vertices.into_iter().collect();
            self.add_geometry(Geometry::Polyline(Polyline {
                vertices,
                is_closed,
            }))
        }

        pub fn add_spline(
            &mut self,
            degree: i32,
            is_closed: bool,
            control_points: Vec<Point3>,
            knots: Vec<f64>,
            weights: Vec<f64>,
        ) -> GeometryId {
            self.add_geometry(Geometry::Spline(Spline {
                degree,
                is_closed,
                control_points,
                knots,
                weights,
            }))
        }

        pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
            let id = self.next_id();
            self.items.push((id, geometry));
            id
        }

        #[inline]
        pub fn items(&self) -> impl Iterator<Item = &(GeometryId, Geometry)> {
            self.items.iter()
        }

        #[inline]
        pub fn geometries(&self) -> impl Iterator<Item = &Geometry> {
            self.items.iter().map(|(_, geometry)| geometry)
        }

        #[inline]
        pub fn item(&self, id: GeometryId) -> Option<&Geometry> {
            self.items.iter().find_map(|(item_id, geometry)| {
                if *item_id == id { Some(geometry) } else { None }
            })
        }

        #[inline]
        pub fn len(&self) -> usize {
            self.items.len()
        }

        #[inline]
        pub fn is_empty(&self) -> bool {
            self.items.is_empty()
        }

        /// 按种类统计条目数，供转换前后的清单日志使用。
        pub fn kind_counts(&self) -> HashMap<GeometryKind, usize> {
            let mut counts = HashMap::new();
            for (_, geometry) in &self.items {
                *counts.entry(geometry.kind()).or_insert(0) += 1;
            }
            counts
        }

        /// 列表中所有条目是否同属一种。空列表返回 true。
        pub fn all_of_kind(&self, kind: GeometryKind) -> bool {
            self.items
                .iter()
                .all(|(_, geometry)| geometry.kind() == kind)
        }

        pub fn bounds(&self) -> Option<Bounds3D> {
            let mut bounds = Bounds3D::empty();
            let mut has = false;
            for (_, geometry) in &self.items {
                if let Some(item_bounds) = geometry.bounds() {
                    bounds.include_bounds(&item_bounds);
                    has = true;
                }
            }
            if has { Some(bounds) } else { None }
        }

        #[inline]
        fn next_id(&mut self) -> GeometryId {
            let id = self.next_id;
            self.next_id += 1;
            GeometryId(id)
        }
    }

    fn normalize_angle_deg(angle: f64) -> f64 {
        let mut result = angle % 360.0;
        if result < 0.0 {
            result += 360.0;
        }
        result
    }

    fn canonical_interval_deg(start: f64, end: f64) -> (f64, f64) {
        let start = normalize_angle_deg(start);
        let mut end = normalize_angle_deg(end);
        if (end - start).abs() < 1e-9 {
            end = start + 360.0;
        } else if end < start {
            end += 360.0;
        }
        (start, end)
    }

    fn arc_point(center: Point3, radius: f64, angle_deg: f64) -> Point3 {
        let angle = angle_deg.to_radians();
        let offset = Vector3::new(radius * angle.cos(), radius * angle.sin(), 0.0);
        center.translate(offset)
    }

    fn arc_bounds(arc: &Arc, bounds: &mut Bounds3D) {
        let radius = arc.radius.abs();
        if radius <= f64::EPSILON {
            bounds.include_point(arc.center);
            return;
        }

        let (start, end) = canonical_interval_deg(arc.start_angle_deg, arc.end_angle_deg);
        bounds.include_point(arc_point(arc.center, radius, start));
        bounds.include_point(arc_point(arc.center, radius, end));

        const QUADRANTS: [f64; 4] = [0.0, 90.0, 180.0, 270.0];
        for base in QUADRANTS {
            let mut candidate = base;
            while candidate < start {
                candidate += 360.0;
            }
            if candidate <= end {
                bounds.include_point(arc_point(arc.center, radius, candidate));
            }
        }
    }

    fn ellipse_bounds(ellipse: &Ellipse, bounds: &mut Bounds3D) {
        let major_vec = ellipse.major_axis.as_vec3();
        let major_length = major_vec.length();

        if major_length <= f64::EPSILON {
            bounds.include_point(ellipse.center);
            return;
        }
        let minor_length = major_length * ellipse.ratio.abs();
        let major_xy = DVec2::new(major_vec.x, major_vec.y);
        let major_dir = if major_xy.length() <= f64::EPSILON {
            DVec2::new(1.0, 0.0)
        } else {
            major_xy / major_xy.length()
        };
        let minor_vec = DVec2::new(-major_dir.y, major_dir.x) * minor_length;

        let step_count = 64;
        for i in 0..=step_count {
            let t = TAU * (i as f64 / step_count as f64);
            let offset = major_xy * t.cos() + minor_vec * t.sin();
            let point = ellipse
                .center
                .translate(Vector3::new(offset.x, offset.y, major_vec.z * t.cos()));
            bounds.include_point(point);
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::geometry::{Point3, Vector3};

        #[test]
        fn list_stores_items_with_stable_ids() {
            let mut list = GeometryList::new();
            let point_id = list.add_point(Point3::new(1.0, 2.0, 3.0));
            let line_id = list.add_line(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0));
            let circle_id = list.add_circle(Point3::new(5.0, 5.0, 0.0), 2.0);
            let arc_id = list.add_arc(Point3::new(5.0, 0.0, 0.0), 3.5, 0.0, 90.0);
            let ellipse_id =
                list.add_ellipse(Point3::new(15.0, 5.0, 0.0), Vector3::new(4.0, 0.0, 0.0), 0.5);

            assert_eq!(point_id.get(), 0);
            assert_eq!(line_id.get(), 1);
            assert_eq!(circle_id.get(), 2);
            assert_eq!(arc_id.get(), 3);
            assert_eq!(ellipse_id.get(), 4);
            assert_eq!(list.len(), 5);

            match list.item(circle_id) {
                Some(Geometry::Arc(arc)) => {
                    assert!(arc.is_full_circle());
                    assert!((arc.radius - 2.0).abs() < f64::EPSILON);
                }
                other => panic!("unexpected item lookup result: {other:?}"),
            }

            match list.item(ellipse_id) {
                Some(Geometry::Ellipse(ellipse)) => {
                    assert!((ellipse.ratio - 0.5).abs() < f64::EPSILON);
                    assert!((ellipse.major_radius() - 4.0).abs() < f64::EPSILON);
                    assert!((ellipse.minor_radius() - 2.0).abs() < f64::EPSILON);
                }
                _ => panic!("expected ellipse item"),
            }

            let counts = list.kind_counts();
            assert_eq!(counts.get(&GeometryKind::Point), Some(&1));
            assert_eq!(counts.get(&GeometryKind::Line), Some(&1));
            assert_eq!(counts.get(&GeometryKind::Arc), Some(&2));
            assert_eq!(counts.get(&GeometryKind::Ellipse), Some(&1));
            assert!(!list.all_of_kind(GeometryKind::Arc));
        }

        #[test]
        fn downgrade_lattice_is_a_chain() {
            assert_eq!(GeometryKind::Ellipse.downgrade(), Some(GeometryKind::Arc));
            assert_eq!(GeometryKind::Arc.downgrade(), Some(GeometryKind::Line));
            assert_eq!(GeometryKind::Line.downgrade(), Some(GeometryKind::Point));
            assert_eq!(GeometryKind::Point.downgrade(), None);
            // 复合种类不在格内，先经外部原语展开。
            assert_eq!(GeometryKind::Polyline.downgrade(), None);
            assert_eq!(GeometryKind::Spline.downgrade(), None);
        }

        #[test]
        fn circle_bounds_cover_all_quadrants() {
            let mut list = GeometryList::new();
            list.add_circle(Point3::new(10.0, -10.0, 2.0), 5.0);
            let bounds = list.bounds().expect("circle should have bounds");
            assert!((bounds.min().x() - 5.0).abs() < 1e-9);
            assert!((bounds.min().y() + 15.0).abs() < 1e-9);
            assert!((bounds.max().x() - 15.0).abs() < 1e-9);
            assert!((bounds.max().y() + 5.0).abs() < 1e-9);
        }

        #[test]
        fn quarter_arc_bounds_stop_at_quadrant_extremes() {
            let mut list = GeometryList::new();
            list.add_arc(Point3::new(0.0, 0.0, 0.0), 10.0, 0.0, 90.0);
            let bounds = list.bounds().expect("arc should have bounds");
            assert!((bounds.min().x()).abs() < 1e-9);
            assert!((bounds.min().y()).abs() < 1e-9);
            assert!((bounds.max().x() - 10.0).abs() < 1e-9);
            assert!((bounds.max().y() - 10.0).abs() < 1e-9);
        }

        #[test]
        fn empty_list_has_no_bounds() {
            let list = GeometryList::new();
            assert!(list.bounds().is_none());
            assert!(list.is_empty());
            assert!(list.all_of_kind(GeometryKind::Point));
        }
    }
}
