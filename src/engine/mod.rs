//! The run loop and everything a node sees during a frame.
//!
//! [`Engine::run`] owns the window, the fixed-frame-rate clock, the scene
//! tree, and the signal registry. Each frame it polls input, then walks the
//! tree depth-first calling `draw` and `tick` on every node via [`advance`].
//!
//! - [`canvas`] - the drawing surface interface and its raylib backend
//! - [`input`] - the per-frame input snapshot
//! - [`config`] - INI configuration for the launcher
//! - [`recorder`] - optional ffmpeg video capture

pub mod canvas;
pub mod config;
pub mod input;
pub mod recorder;

use std::mem;
use std::path::PathBuf;

use log::{error, info};
use raylib::prelude::{RaylibDraw, RaylibTextureModeExt, ffi};
use smallvec::SmallVec;

use crate::engine::canvas::{Canvas, NullCanvas, RaylibCanvas};
use crate::engine::input::Input;
use crate::engine::recorder::Recorder;
use crate::math::color::Color;
use crate::math::vec3d::Size;
use crate::scene::node::{Node, NodeKind};
use crate::scene::tree::{NodeId, Tree};
use crate::signal::{Signal, SignalHub, SignalKind};

/// What a node can reach during `ready` and `tick`: the tree, the signal
/// registry, this frame's input, and the engine's screen state.
pub struct Context<'a> {
    pub tree: &'a mut Tree,
    pub signals: &'a mut SignalHub,
    pub input: &'a Input,
    /// The window size in the node coordinate space.
    pub screen: Size,
    /// Frames elapsed since the engine started. 0 during the ready pass.
    pub frame: u64,
    quit: bool,
}

impl<'a> Context<'a> {
    pub fn new(
        tree: &'a mut Tree,
        signals: &'a mut SignalHub,
        input: &'a Input,
        screen: Size,
        frame: u64,
    ) -> Self {
        Context {
            tree,
            signals,
            input,
            screen,
            frame,
            quit: false,
        }
    }

    /// Emit a signal, synchronously running every subscriber registered for
    /// its emitter and kind.
    pub fn emit(&mut self, signal: Signal) {
        self.signals.emit(signal, &mut *self.tree);
    }

    /// Register a callback for signals of `kind` emitted by `emitter`.
    pub fn connect(
        &mut self,
        emitter: NodeId,
        kind: SignalKind,
        callback: impl FnMut(&Signal, &mut Tree) + 'static,
    ) {
        self.signals.connect(emitter, kind, callback);
    }

    /// Ask the engine to stop after this frame.
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// Run one node and its subtree for one frame, depth-first pre-order.
///
/// With a nonzero `delta` each node draws, then ticks, then its children are
/// visited. A zero delta is the ready-pass sentinel: `ready` runs instead and
/// nothing is drawn.
///
/// The child list is snapshotted per node after that node's tick, so a node
/// inserting children during its own tick sees them visited this frame,
/// while nodes removed mid-frame are skipped (their slot is gone by the time
/// the traversal reaches them). No node is visited twice.
pub fn advance(id: NodeId, delta: f64, ctx: &mut Context, canvas: &mut dyn Canvas) {
    let Some(node) = ctx.tree.get_mut(id) else {
        return;
    };
    // The kind is moved out of the slot for the duration of the dispatch so
    // the node can reach the rest of the tree through ctx without aliasing
    // itself.
    let mut kind = mem::replace(&mut node.kind, NodeKind::Blank);
    if delta != 0.0 {
        kind.draw(canvas);
        kind.tick(id, delta, ctx);
    } else {
        kind.ready(id, ctx);
    }
    if let Some(node) = ctx.tree.get_mut(id) {
        node.kind = kind;
    }

    let children: SmallVec<[NodeId; 8]> = match ctx.tree.get(id) {
        Some(node) => node.children().iter().copied().collect(),
        None => return,
    };
    for child in children {
        advance(child, delta, ctx, canvas);
    }
}

/// The engine: window settings, the fixed-timestep clock, the root scene,
/// and the signal registry.
///
/// Create one, adjust it with the builder methods, then call [`Engine::run`]
/// exactly once. `run` blocks until the window closes or a node requests
/// quit.
pub struct Engine {
    /// The width and height of the window.
    pub size: Size,
    /// The window title. Defaults to the root scene's tag when empty.
    pub title: String,
    /// Background color filled before each frame when `clear` is set.
    pub background: Color,
    /// Target ticks per second.
    pub frame_rate: u32,
    /// Whether to clear the frame to `background` every tick. Some
    /// simulations (spiral) want the previous frames to persist.
    pub clear: bool,
    /// Whether to capture frames into a video file.
    pub record: bool,
    /// Recording output path; derived from the root tag when unset.
    pub record_path: Option<PathBuf>,
    frame_count: u64,
    tree: Tree,
    signals: SignalHub,
}

impl Engine {
    pub fn new(size: Size) -> Self {
        Engine {
            size,
            title: String::new(),
            background: Color::BLACK,
            frame_rate: 60,
            clear: true,
            record: false,
            record_path: None,
            frame_count: 0,
            tree: Tree::new(),
            signals: SignalHub::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    pub fn with_record(mut self, record: bool, path: Option<PathBuf>) -> Self {
        self.record = record;
        self.record_path = path;
        self
    }

    pub fn width(&self) -> f64 {
        self.size.width()
    }

    pub fn height(&self) -> f64 {
        self.size.height()
    }

    /// Frames elapsed since `run` started.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Thin forwarder into the signal registry.
    pub fn connect(
        &mut self,
        emitter: NodeId,
        kind: SignalKind,
        callback: impl FnMut(&Signal, &mut Tree) + 'static,
    ) {
        self.signals.connect(emitter, kind, callback);
    }

    /// Mount `root`, run the build/ready passes, then block in the frame
    /// loop until quit. Finalizes any recording before returning.
    pub fn run(mut self, root: Node) {
        let root_id = self.tree.mount_root(root);
        let title = if self.title.is_empty() {
            self.tree
                .get(root_id)
                .map(|node| node.tag.clone())
                .unwrap_or_else(|| "simscene".to_string())
        } else {
            self.title.clone()
        };

        let width = self.size.width() as i32;
        let height = self.size.height() as i32;
        info!("Running {} at {}x{}", title, width, height);

        let (mut rl, thread) = raylib::init().size(width, height).title(&title).build();
        rl.set_target_fps(self.frame_rate);

        // Scenes draw into a render texture so that frames persist when
        // clearing is disabled; the window's double buffering would
        // otherwise alternate between two half-drawn histories.
        let mut target = rl
            .load_render_texture(&thread, width as u32, height as u32)
            .expect("Failed to create render target");

        let mut recorder = if self.record {
            let path = self
                .record_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("{}.mp4", title)));
            Some(
                Recorder::spawn(&path, width as u32, height as u32, self.frame_rate)
                    .expect("Failed to start ffmpeg recorder"),
            )
        } else {
            None
        };

        // Build is done; run the one-time ready pass with the zero-delta
        // sentinel, then fill the background once before the first frame.
        let mut quit = {
            let input = Input::poll(&rl);
            let mut ctx = Context::new(&mut self.tree, &mut self.signals, &input, self.size, 0);
            advance(root_id, 0.0, &mut ctx, &mut NullCanvas);
            ctx.quit_requested()
        };
        {
            let mut d = rl.begin_drawing(&thread);
            let mut t = d.begin_texture_mode(&thread, &mut target);
            t.clear_background(canvas::raylib_color(self.background));
        }

        while !rl.window_should_close() && !quit {
            let mut delta = rl.get_frame_time() as f64;
            if delta == 0.0 {
                // The very first frame reports no elapsed time, and a zero
                // delta is reserved for the ready sentinel.
                delta = 1.0 / self.frame_rate as f64;
            }
            self.frame_count += 1;
            let input = Input::poll(&rl);

            {
                let mut d = rl.begin_drawing(&thread);
                {
                    let mut t = d.begin_texture_mode(&thread, &mut target);
                    if self.clear {
                        t.clear_background(canvas::raylib_color(self.background));
                    }
                    let mut canvas = RaylibCanvas::new(&mut t, self.size);
                    let mut ctx = Context::new(
                        &mut self.tree,
                        &mut self.signals,
                        &input,
                        self.size,
                        self.frame_count,
                    );
                    advance(root_id, delta, &mut ctx, &mut canvas);
                    quit = ctx.quit_requested();
                }
                // Blit the render texture to the window. The source height
                // is negative to undo OpenGL's inverted texture rows.
                let src = ffi::Rectangle {
                    x: 0.0,
                    y: 0.0,
                    width: width as f32,
                    height: -(height as f32),
                };
                let dest = ffi::Rectangle {
                    x: 0.0,
                    y: 0.0,
                    width: width as f32,
                    height: height as f32,
                };
                unsafe {
                    ffi::DrawTexturePro(
                        target.texture,
                        src,
                        dest,
                        ffi::Vector2 { x: 0.0, y: 0.0 },
                        0.0,
                        ffi::Color {
                            r: 255,
                            g: 255,
                            b: 255,
                            a: 255,
                        },
                    );
                }
            }

            let mut record_failed = false;
            if let Some(rec) = recorder.as_mut() {
                let image = rl.load_image_from_screen(&thread);
                let colors = image.get_image_data();
                let mut bytes = Vec::with_capacity(colors.len() * 4);
                for color in colors.iter() {
                    bytes.extend_from_slice(&[color.r, color.g, color.b, color.a]);
                }
                if let Err(e) = rec.push_frame(&bytes) {
                    error!("Recording failed, disabling capture: {}", e);
                    record_failed = true;
                }
            }
            if record_failed {
                // Still reap the ffmpeg child; it may have salvaged the
                // frames written so far.
                if let Some(rec) = recorder.take() {
                    let _ = rec.finish();
                }
            }
        }

        if let Some(rec) = recorder {
            if let Err(e) = rec.finish() {
                error!("Failed to finalize recording: {}", e);
            }
        }
    }
}
