use petgraph::stable_graph::NodeIndex;
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    config::RenderConfig,
    error::{Error, Result},
    graph::{node::Role, social_graph::SocialGraph},
    layout::{Point, Positions},
    render::style::{Canvas, Style},
};

/// A composed picture, ready to be written as SVG or rasterized.
#[derive(Debug, Clone)]
pub struct Scene {
    pub svg: String,
    pub width_px: u32,
    pub height_px: u32,
    pub students_drawn: usize,
    pub teachers_drawn: usize,
    pub edges_drawn: usize,
}

impl Scene {
    pub fn nodes_drawn(&self) -> usize {
        self.students_drawn + self.teachers_drawn
    }
}

/// Maps layout coordinates in [-1, 1] onto the canvas, y pointing up.
struct Projection {
    width: f64,
    height: f64,
    margin_x: f64,
    margin_y: f64,
}

impl Projection {
    fn new(canvas: &Canvas) -> Self {
        let width = canvas.width_px() as f64;
        let height = canvas.height_px() as f64;
        let margin = canvas.margin.clamp(0.0, 0.45) as f64;
        Projection {
            width,
            height,
            margin_x: width * margin,
            margin_y: height * margin,
        }
    }

    fn project(&self, p: Point) -> Point {
        let usable_w = self.width - 2.0 * self.margin_x;
        let usable_h = self.height - 2.0 * self.margin_y;
        Point::new(
            self.margin_x + (p.x + 1.0) * 0.5 * usable_w,
            self.margin_y + (1.0 - p.y) * 0.5 * usable_h,
        )
    }
}

/// SVG document assembled in memory. Attribute values and text are escaped by quick-xml.
struct SvgWriter {
    writer: Writer<Vec<u8>>,
}

impl SvgWriter {
    fn new() -> Result<Self> {
        let mut writer = Writer::new(Vec::with_capacity(4096));
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(SvgWriter { writer })
    }

    fn element<'a>(name: &'a str, attributes: &'a [(&'a str, String)]) -> BytesStart<'a> {
        let mut start = BytesStart::new(name);
        for (key, value) in attributes {
            start.push_attribute((*key, value.as_str()));
        }
        start
    }

    fn open(&mut self, name: &str, attributes: &[(&str, String)]) -> Result<()> {
        self.writer
            .write_event(Event::Start(Self::element(name, attributes)))?;
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, String)]) -> Result<()> {
        self.writer
            .write_event(Event::Empty(Self::element(name, attributes)))?;
        Ok(())
    }

    fn text(&mut self, name: &str, attributes: &[(&str, String)], text: &str) -> Result<()> {
        self.open(name, attributes)?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.close(name)
    }

    fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner()).map_err(|e| Error::Encode(e.to_string()))
    }
}

fn px(value: impl Into<f64>) -> String {
    format!("{:.2}", value.into())
}

/// Compose the picture: dashed edges underneath, student then teacher markers,
/// node labels, and finally weight labels on the edge midpoints.
pub fn draw_graph(graph: &SocialGraph, positions: &Positions, config: &RenderConfig) -> Result<Scene> {
    let canvas = &config.canvas;
    let style = &config.style;
    let projection = Projection::new(canvas);
    let (width_px, height_px) = (canvas.width_px(), canvas.height_px());
    let font_px = canvas.pt(style.font_size) as f64;

    let screen = |index: NodeIndex| -> Option<Point> {
        match positions.get(&index) {
            Some(p) => Some(projection.project(*p)),
            None => {
                log::warn!("No position for node {}, skipping it", graph.node(index).id);
                None
            }
        }
    };

    let mut svg = SvgWriter::new()?;
    svg.open(
        "svg",
        &[
            ("xmlns", "http://www.w3.org/2000/svg".to_string()),
            ("width", width_px.to_string()),
            ("height", height_px.to_string()),
            ("viewBox", format!("0 0 {width_px} {height_px}")),
        ],
    )?;
    svg.empty(
        "rect",
        &[
            ("width", "100%".to_string()),
            ("height", "100%".to_string()),
            ("fill", style.background.clone()),
        ],
    )?;

    // Edges
    let edge_width = canvas.pt(style.edge_width);
    let mut edge_group = vec![
        ("class", "edges".to_string()),
        ("stroke", style.edge_color.clone()),
        ("stroke-width", px(edge_width)),
        ("stroke-linecap", "round".to_string()),
    ];
    if style.edge_dashed {
        edge_group.push((
            "stroke-dasharray",
            format!("{} {}", px(3.7 * edge_width), px(1.6 * edge_width)),
        ));
    }
    let mut edge_labels = Vec::new();
    let mut edges_drawn = 0;
    svg.open("g", &edge_group)?;
    for (a, b, link) in graph.edges() {
        let (Some(pa), Some(pb)) = (screen(a), screen(b)) else {
            continue;
        };
        svg.empty(
            "line",
            &[
                ("x1", px(pa.x)),
                ("y1", px(pa.y)),
                ("x2", px(pb.x)),
                ("y2", px(pb.y)),
            ],
        )?;
        edge_labels.push((pa, pb, link.label.as_str()));
        edges_drawn += 1;
    }
    svg.close("g")?;

    // Nodes: students first so teachers sit on top
    let mut students_drawn = 0;
    let mut teachers_drawn = 0;
    let mut node_labels = Vec::new();
    for role in [Role::Student, Role::Teacher] {
        let (color, area, class) = match role {
            Role::Student => (&style.student_color, style.student_size, "nodes student"),
            Role::Teacher => (&style.teacher_color, style.teacher_size, "nodes teacher"),
        };
        let radius = px(canvas.pt(Style::marker_radius(area)));
        let opacity = px(style.node_alpha.clamp(0.0, 1.0));
        svg.open("g", &[("class", class.to_string())])?;
        for index in graph.node_indices() {
            if graph.role(index, &config.teacher_prefixes) != role {
                continue;
            }
            let Some(p) = screen(index) else {
                continue;
            };
            svg.empty(
                "circle",
                &[
                    ("cx", px(p.x)),
                    ("cy", px(p.y)),
                    ("r", radius.clone()),
                    ("fill", color.clone()),
                    ("fill-opacity", opacity.clone()),
                ],
            )?;
            match role {
                Role::Student => students_drawn += 1,
                Role::Teacher => teachers_drawn += 1,
            }
            node_labels.push((p, graph.node(index).label.as_str()));
        }
        svg.close("g")?;
    }

    let text_group = |class: &str| {
        vec![
            ("class", class.to_string()),
            ("font-family", style.font_family.clone()),
            ("font-size", px(font_px)),
            ("text-anchor", "middle".to_string()),
            ("dominant-baseline", "central".to_string()),
        ]
    };

    // Node labels
    let mut node_label_group = text_group("node-labels");
    node_label_group.push(("fill", style.node_label_color.clone()));
    svg.open("g", &node_label_group)?;
    for (p, label) in node_labels {
        if label.is_empty() {
            continue;
        }
        svg.text("text", &[("x", px(p.x)), ("y", px(p.y))], label)?;
    }
    svg.close("g")?;

    // Edge weight labels on a white box
    svg.open("g", &text_group("edge-labels"))?;
    for (pa, pb, label) in edge_labels {
        let mid = pa.midpoint(pb);
        let angle = if style.rotate_edge_labels {
            upright_angle(pa, pb)
        } else {
            0.0
        };
        // Rough glyph metrics; the box only has to cover the dashes behind the text.
        let box_w = label.chars().count() as f64 * 0.62 * font_px + font_px * 0.6;
        let box_h = font_px * 1.4;
        svg.open(
            "g",
            &[(
                "transform",
                format!("rotate({} {} {})", px(angle), px(mid.x), px(mid.y)),
            )],
        )?;
        svg.empty(
            "rect",
            &[
                ("x", px(mid.x - box_w / 2.0)),
                ("y", px(mid.y - box_h / 2.0)),
                ("width", px(box_w)),
                ("height", px(box_h)),
                ("rx", px(box_h * 0.3)),
                ("fill", style.edge_label_background.clone()),
            ],
        )?;
        svg.text(
            "text",
            &[
                ("x", px(mid.x)),
                ("y", px(mid.y)),
                ("fill", style.edge_label_color.clone()),
            ],
            label,
        )?;
        svg.close("g")?;
    }
    svg.close("g")?;
    svg.close("svg")?;

    log::debug!(
        "Composed {}x{} scene: {} students, {} teachers, {} edges",
        width_px,
        height_px,
        students_drawn,
        teachers_drawn,
        edges_drawn
    );

    Ok(Scene {
        svg: svg.finish()?,
        width_px,
        height_px,
        students_drawn,
        teachers_drawn,
        edges_drawn,
    })
}

/// Angle of the segment in degrees, folded into (-90, 90] so text never reads upside down.
fn upright_angle(a: Point, b: Point) -> f64 {
    let mut angle = (b.y - a.y).atan2(b.x - a.x).to_degrees();
    if angle > 90.0 {
        angle -= 180.0;
    } else if angle <= -90.0 {
        angle += 180.0;
    }
    angle
}
