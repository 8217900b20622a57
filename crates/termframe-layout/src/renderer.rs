#![forbid(unsafe_code)]

//! The stateful tree walker: resolves the document's box model into cell
//! writes on a fresh [`Screen`], then compiles it against the previous
//! frame (spec §4.4).

use termframe_document::{Document, Node, NodeSnapshot, StyleColors};
use termframe_render::{ansi, Screen};

/// Knobs for a single [`Renderer::render`] call.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Cells per tab stop. Zero is treated as one.
    pub tabstop: u16,
    /// Whether to compile against the previous frame (`true`) or always
    /// emit a full, non-differential frame (`false`).
    pub differential: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tabstop: 4,
            differential: true,
        }
    }
}

/// One container frame on the box stack: the usable area, in absolute
/// screen coordinates, that the current node's children write into.
///
/// `height`/`width` are signed: margins on an undersized block can drive
/// them negative, at which point every write inside is suppressed (spec
/// §4.4 "tie-breaks").
#[derive(Debug, Clone, Copy)]
struct Container {
    height: i64,
    width: i64,
    x: i64,
    y: i64,
}

type StyleFrame = (Option<String>, Option<String>);

/// Owns the previous frame and walks a [`Document`]'s body into a fresh
/// one on every call to [`Renderer::render`].
#[derive(Debug, Default)]
pub struct Renderer {
    previous: Option<Screen>,
}

impl Renderer {
    #[must_use]
    pub fn new() -> Self {
        Self { previous: None }
    }

    /// Render the document's current body against its current dimensions,
    /// returning the ANSI command string to bring the terminal up to date.
    pub fn render(&mut self, document: &Document, options: RenderOptions) -> String {
        let width = document.width();
        let height = document.height();
        let mut screen = Screen::new(width, height);

        if let Some(body) = document.body() {
            let tabstop = i64::from(options.tabstop.max(1));
            let mut walk = Walk {
                screen: &mut screen,
                box_stack: vec![Container {
                    height: i64::from(height),
                    width: i64::from(width),
                    x: 0,
                    y: 0,
                }],
                cur_pos: vec![(0i64, 0i64)],
                styles: vec![(None, None)],
                tabstop,
            };
            walk.walk(&body);
        }

        let output = if options.differential {
            screen.compile(self.previous.as_ref())
        } else {
            screen.compile_full()
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(differential = options.differential, "frame rendered");
        self.previous = Some(screen);
        output
    }
}

struct Walk<'a> {
    screen: &'a mut Screen,
    box_stack: Vec<Container>,
    cur_pos: Vec<(i64, i64)>,
    styles: Vec<StyleFrame>,
    tabstop: i64,
}

impl Walk<'_> {
    fn top_box(&self) -> Container {
        *self.box_stack.last().expect("box stack is never empty")
    }

    fn top_cursor(&self) -> (i64, i64) {
        *self.cur_pos.last().expect("cursor stack is never empty")
    }

    fn set_top_cursor(&mut self, x: i64, y: i64) {
        *self.cur_pos.last_mut().expect("cursor stack is never empty") = (x, y);
    }

    fn top_style(&self) -> StyleFrame {
        self.styles.last().cloned().unwrap_or((None, None))
    }

    fn write_cell(&mut self, x: i64, y: i64, ch: Option<char>, fg: Option<String>, bg: Option<String>, z_index: i32) {
        debug_assert!(
            self.screen.in_bounds(x, y),
            "walk produced an out-of-bounds write at ({x}, {y})"
        );
        if self.screen.in_bounds(x, y) {
            let _ = self.screen.set(x, y, ch, fg, bg, z_index);
        }
    }

    fn walk(&mut self, node: &Node) {
        match node.snapshot() {
            NodeSnapshot::Block => self.handle_block(node),
            NodeSnapshot::Text(content) => self.handle_text(&content),
            NodeSnapshot::Newline => self.handle_newline(),
            NodeSnapshot::Tab => self.handle_tab(),
            NodeSnapshot::Style(colors) => self.handle_style(node, colors),
            NodeSnapshot::StyleOverride(colors) => self.handle_style_override(node, colors),
        }
    }

    fn handle_block(&mut self, node: &Node) {
        let attrs = node.attributes();
        let container = self.top_box();
        let (cx, cy) = self.top_cursor();

        let inner_height = attrs.height.map_or(container.height, i64::from);
        let inner_width = attrs.width.map_or(container.width, i64::from);

        let (base_x, base_y) = if attrs.absolute {
            (i64::from(attrs.pos_x), i64::from(attrs.pos_y))
        } else {
            (container.x + cx, container.y + cy)
        };

        let new_box = Container {
            x: base_x + i64::from(attrs.margin_left),
            y: base_y + i64::from(attrs.margin_top),
            width: inner_width - i64::from(attrs.margin_left) - i64::from(attrs.margin_right),
            height: inner_height - i64::from(attrs.margin_top) - i64::from(attrs.margin_bottom),
        };

        self.box_stack.push(new_box);
        self.cur_pos.push((0, 0));
        for child in node.children() {
            self.walk(&child);
        }
        self.cur_pos.pop();
        self.box_stack.pop();
    }

    fn handle_text(&mut self, content: &str) {
        let container = self.top_box();
        let (fg, bg) = self.top_style();
        let (mut cx, mut cy) = self.top_cursor();

        for c in content.chars() {
            if cy >= container.height {
                break;
            }
            if container.width > 0 {
                self.write_cell(container.x + cx, container.y + cy, Some(c), fg.clone(), bg.clone(), 0);
            }
            if cx == container.width - 1 {
                cx = 0;
                cy += 1;
            } else {
                cx += 1;
            }
        }

        self.set_top_cursor(cx, cy);
    }

    fn handle_newline(&mut self) {
        let (_, cy) = self.top_cursor();
        self.set_top_cursor(0, cy + 1);
    }

    fn handle_tab(&mut self) {
        let container = self.top_box();
        let (cx, cy) = self.top_cursor();
        let diff = self.tabstop - cx.rem_euclid(self.tabstop);
        let (new_cx, new_cy) = if cx + diff > container.width {
            (diff, cy + 1)
        } else {
            (cx + diff, cy)
        };
        self.set_top_cursor(new_cx, new_cy);
    }

    fn handle_style(&mut self, node: &Node, colors: StyleColors) {
        self.styles.push(resolve_style_frame(colors));
        for child in node.children() {
            self.walk(&child);
        }
        self.styles.pop();
    }

    /// A point overlay, not a style context: writes directly into the
    /// back buffer at an elevated `z_index`, bypassing the style stack.
    fn handle_style_override(&mut self, node: &Node, colors: StyleColors) {
        let attrs = node.attributes();
        let container = self.top_box();
        let (x, y) = if attrs.absolute {
            (i64::from(attrs.pos_x), i64::from(attrs.pos_y))
        } else {
            (
                container.x + i64::from(attrs.margin_left),
                container.y + i64::from(attrs.margin_top),
            )
        };
        if !self.screen.in_bounds(x, y) {
            return;
        }
        let existing_z = self.screen.get(x, y).map(|cell| cell.z_index).unwrap_or(-1);
        let (fg, bg) = resolve_style_frame(colors);
        self.write_cell(x, y, None, fg, bg, existing_z + 10);
    }
}

fn resolve_style_frame(colors: StyleColors) -> StyleFrame {
    let fg = colors.color.map(|c| ansi::fg(c, colors.bright));
    let bg = colors.bg_color.map(|c| ansi::bg(c, colors.bg_bright));
    (fg, bg)
}
