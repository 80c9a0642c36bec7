//! Mirror Sketch entry point
//!
//! On the web this hosts the sketch on a canvas: one tick per animation
//! frame, pointer drags aim the sight ball. Natively it runs headless demo
//! flights and prints what each one did.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_host {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use mirror_sketch::renderer::RenderState;
    use mirror_sketch::renderer::pipeline::screen_to_logical;
    use mirror_sketch::sim::{PointerEvent, Simulation, apply_input, tick};
    use mirror_sketch::{DrawStyle, Settings, draw_list};

    /// Sketch instance holding all state
    struct Sketch {
        sim: Simulation,
        style: DrawStyle,
        render_state: Option<RenderState>,
        /// A drag gesture is in progress
        pointer_down: bool,
        /// Canvas size in CSS pixels, for pointer mapping
        canvas_size: (u32, u32),
    }

    impl Sketch {
        fn new(settings: &Settings) -> Self {
            Self {
                sim: Simulation::with_settings(settings),
                style: DrawStyle::from(settings),
                render_state: None,
                pointer_down: false,
                canvas_size: (1, 1),
            }
        }

        /// Pointer moved to canvas pixel (px, py)
        fn pointer_moved(&mut self, px: f32, py: f32) {
            if !self.pointer_down {
                return;
            }
            let p = screen_to_logical(self.canvas_size, px, py);
            apply_input(&mut self.sim, PointerEvent::DragMove { x: p.x });
        }

        fn pointer_released(&mut self) {
            self.pointer_down = false;
            apply_input(&mut self.sim, PointerEvent::DragEnd);
        }

        fn update(&mut self) {
            tick(&mut self.sim);
            for event in self.sim.drain_events() {
                log::debug!("{:?}", event);
            }
        }

        fn render(&mut self) {
            let commands = draw_list(&self.sim, &self.style);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&commands) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Mirror Sketch starting...");

        let window = web_sys::window().expect("No window");
        let document = window.document().expect("No document");
        let canvas = document
            .get_element_by_id("canvas")
            .expect("No canvas element")
            .dyn_into::<HtmlCanvasElement>()
            .expect("Not a canvas");

        let client_w = canvas.client_width().max(1) as u32;
        let client_h = canvas.client_height().max(1) as u32;
        let dpr = window.device_pixel_ratio();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let sketch = Rc::new(RefCell::new(Sketch::new(&settings)));
        sketch.borrow_mut().canvas_size = (client_w, client_h);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => sketch.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("No render device, running without drawing: {}", e),
        }

        setup_input_handlers(&canvas, sketch.clone());
        request_animation_frame(sketch);

        log::info!("Mirror Sketch running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, sketch: Rc<RefCell<Sketch>>) {
        // Mouse down starts a drag
        {
            let sketch = sketch.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut s = sketch.borrow_mut();
                s.canvas_size = (
                    canvas_clone.client_width().max(1) as u32,
                    canvas_clone.client_height().max(1) as u32,
                );
                // Pressing alone doesn't move the sight ball; only motion does
                s.pointer_down = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move drags while held
        {
            let sketch = sketch.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                sketch
                    .borrow_mut()
                    .pointer_moved(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up anywhere ends the drag
        {
            let sketch = sketch.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                sketch.borrow_mut().pointer_released();
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start / move
        for name in ["touchstart", "touchmove"] {
            let sketch = sketch.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut s = sketch.borrow_mut();
                    s.canvas_size = (
                        canvas_clone.client_width().max(1) as u32,
                        canvas_clone.client_height().max(1) as u32,
                    );
                    if name == "touchstart" {
                        s.pointer_down = true;
                        return;
                    }
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    s.pointer_moved(x, y);
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                sketch.borrow_mut().pointer_released();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(sketch: Rc<RefCell<Sketch>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            sketch_loop(sketch);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn sketch_loop(sketch: Rc<RefCell<Sketch>>) {
        {
            let mut s = sketch.borrow_mut();
            s.update();
            s.render();
        }
        request_animation_frame(sketch);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_host::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use mirror_sketch::Settings;

    env_logger::init();
    log::info!("Mirror Sketch (native) starting...");
    log::info!("Native mode runs headless demo flights - serve the wasm build to interact");

    let settings = Settings::load();

    // Aim points from the command line, or a few that show each outcome
    let mut aims: Vec<f32> = std::env::args()
        .skip(1)
        .filter_map(|arg| match arg.parse() {
            Ok(x) => Some(x),
            Err(_) => {
                log::warn!("Ignoring non-numeric aim {:?}", arg);
                None
            }
        })
        .collect();
    if aims.is_empty() {
        aims = vec![450.0, 400.0, 450.0 - 4000.0 / 175.0, 510.0];
    }

    for x in aims {
        demo_flight(&settings, x);
    }
}

/// Upper bound on frames for one headless flight
#[cfg(not(target_arch = "wasm32"))]
const MAX_DEMO_FRAMES: u32 = 10_000;

#[cfg(not(target_arch = "wasm32"))]
fn demo_flight(settings: &mirror_sketch::Settings, aim_x: f32) {
    use mirror_sketch::sim::{SimEvent, Simulation, tick};

    let mut sim = Simulation::with_settings(settings);
    if !sim.drag_move(aim_x) {
        log::warn!("Aim x={:.1} is outside the drag window {:?}", aim_x, sim.sight().range());
        return;
    }
    sim.drag_end();

    let mut frames = 0;
    let mut reflections = 0;
    let mut outcome = "still flying";
    while sim.particle().is_moving() && frames < MAX_DEMO_FRAMES {
        tick(&mut sim);
        frames += 1;
        for event in sim.drain_events() {
            log::debug!("frame {}: {:?}", frames, event);
            match event {
                SimEvent::Reflected { .. } => reflections += 1,
                SimEvent::HitWall { .. } => outcome = "wall",
                SimEvent::HitDiamond { .. } => outcome = "diamond",
                _ => {}
            }
        }
    }

    println!(
        "aim x={:.1} heading {:.1}°: {} after {} frames, {} reflection(s), path {:.1}",
        aim_x,
        sim.sight().heading(),
        outcome,
        frames,
        reflections,
        sim.path_length()
    );
    for (i, ghost) in sim.ghosts().iter().enumerate() {
        println!(
            "  ghost {}: from ({:.1}, {:.1}) length {:.1}{}",
            i + 1,
            ghost.anchor.x,
            ghost.anchor.y,
            ghost.length(),
            if ghost.hit { ", image of the diamond" } else { "" }
        );
    }
}
