use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, TouchEvent};
use yew::prelude::*;

use crate::canvas::PixelCanvas;
use crate::config::{Settings, SettingsAction};
use crate::input::InputEvent;
use crate::led::LedCommand;
use crate::model::{CellChange, Mode};
use crate::render::{Canvas2dRenderer, Renderer};
use crate::state::TouchState;
use crate::util::clog;
use super::{
    camera_controls::CameraControls, controls_panel::ControlsPanel, export_panel::ExportPanel,
    settings_modal::SettingsModal, stats_panel::StatsPanel,
};

const ACTIVITY_LIMIT: usize = 12;
const PAN_STEP: f64 = 64.0;

type DrawRef = Rc<RefCell<Option<Rc<dyn Fn()>>>>;

fn redraw(draw_ref: &DrawRef) {
    if let Some(f) = &*draw_ref.borrow() {
        f();
    }
}

fn push_activity(activity: &RefCell<Vec<String>>, line: String) {
    let mut log = activity.borrow_mut();
    log.push(line);
    if log.len() > ACTIVITY_LIMIT {
        log.remove(0);
    }
}

fn touch_points(canvas: &HtmlCanvasElement, e: &TouchEvent) -> Vec<(f64, f64)> {
    let rect = canvas.get_bounding_client_rect();
    let touches = e.touches();
    (0..touches.length())
        .filter_map(|i| touches.item(i))
        .map(|t| {
            (
                t.client_x() as f64 - rect.left(),
                t.client_y() as f64 - rect.top(),
            )
        })
        .collect()
}

#[derive(Properties, PartialEq, Clone)]
pub struct PixelViewProps {
    pub settings: UseReducerHandle<Settings>,
}

#[function_component(PixelView)]
pub fn pixel_view(props: &PixelViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let initial_mode = props.settings.initial_mode();
    let pixel_canvas = use_mut_ref(move || {
        let mut pc = PixelCanvas::new();
        pc.set_mode(initial_mode);
        pc
    });
    let touch_state = use_mut_ref(TouchState::default);
    let draw_ref: DrawRef = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let show_grid_flag = use_mut_ref(|| props.settings.show_grid_lines);
    let real_time_flag = use_mut_ref(|| props.settings.real_time);
    let activity = use_mut_ref(Vec::<String>::new);
    let last_export = use_state(|| None::<LedCommand>);
    let open_settings = use_state(|| false);
    let force_update = use_force_update();

    // Listener: real-time pixel commands
    {
        let pixel_canvas = pixel_canvas.clone();
        let real_time_flag = real_time_flag.clone();
        let activity = activity.clone();
        use_effect_with((), move |_| {
            pixel_canvas
                .borrow_mut()
                .set_listener(Some(Box::new(move |change: CellChange| {
                    if !*real_time_flag.borrow() {
                        return;
                    }
                    let line = LedCommand::pixel(change).log_line();
                    clog(&line);
                    push_activity(&activity, line);
                })));
            move || {
                pixel_canvas.borrow_mut().set_listener(None);
            }
        });
    }
    // Effect: grid lines setting
    {
        let draw_ref = draw_ref.clone();
        let flag = props.settings.show_grid_lines;
        let show_grid_flag = show_grid_flag.clone();
        use_effect_with(flag, move |_| {
            *show_grid_flag.borrow_mut() = flag;
            redraw(&draw_ref);
            || ()
        });
    }
    // Effect: real-time setting
    {
        let flag = props.settings.real_time;
        let real_time_flag = real_time_flag.clone();
        use_effect_with(flag, move |_| {
            *real_time_flag.borrow_mut() = flag;
            || ()
        });
    }
    // Main mount effect (events)
    {
        let canvas_ref = canvas_ref.clone();
        let pixel_canvas = pixel_canvas.clone();
        let touch_state = touch_state.clone();
        let draw_ref_setup = draw_ref.clone();
        let show_grid_flag = show_grid_flag.clone();
        let force_update = force_update.clone();
        let activity = activity.clone();
        use_effect_with((), move |_| {
            // The panel starts blank along with the canvas
            let clear = LedCommand::clear_screen().log_line();
            clog(&clear);
            push_activity(&activity, clear);
            let window = web_sys::window().expect("window");
            let canvas: HtmlCanvasElement = canvas_ref.cast::<HtmlCanvasElement>().expect("canvas");
            let apply_canvas_size = {
                let canvas = canvas.clone();
                let window = window.clone();
                move || {
                    let width = window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(640.0);
                    let height = window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(640.0);
                    // square viewport
                    let side = width.min(height).max(0.0) as u32;
                    canvas.set_width(side);
                    canvas.set_height(side);
                }
            };
            apply_canvas_size();
            let draw_closure: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let pixel_canvas = pixel_canvas.clone();
                let show_grid_flag = show_grid_flag.clone();
                let renderer = RefCell::new(Canvas2dRenderer::new(canvas.clone()));
                Rc::new(move || {
                    let pc = pixel_canvas.borrow();
                    let snapshot = pc.snapshot(canvas.width(), *show_grid_flag.borrow());
                    renderer.borrow_mut().render(&snapshot);
                })
            };
            *draw_ref_setup.borrow_mut() = Some(draw_closure.clone());
            draw_closure();
            // Drain pending gestures into the canvas, then redraw if anything changed
            let process: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let pixel_canvas = pixel_canvas.clone();
                let touch_state = touch_state.clone();
                let draw = draw_closure.clone();
                let force_update = force_update.clone();
                Rc::new(move || {
                    if !touch_state.borrow().has_pending() {
                        return;
                    }
                    let dirty = {
                        let mut pc = pixel_canvas.borrow_mut();
                        let mut ts = touch_state.borrow_mut();
                        pc.pump(&mut *ts, canvas.width());
                        pc.take_dirty()
                    };
                    if dirty {
                        draw();
                        force_update.force_update();
                    }
                })
            };
            let mousedown_cb = {
                let touch_state = touch_state.clone();
                let process = process.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    if e.button() != 0 {
                        return;
                    }
                    touch_state.borrow_mut().begin(
                        e.offset_x() as f64,
                        e.offset_y() as f64,
                        js_sys::Date::now(),
                    );
                    process();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                )
                .ok();
            let mousemove_cb = {
                let touch_state = touch_state.clone();
                let process = process.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    if e.buttons() & 1 == 0 {
                        return;
                    }
                    touch_state
                        .borrow_mut()
                        .drag(e.offset_x() as f64, e.offset_y() as f64);
                    process();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                )
                .ok();
            let mouseup_cb = {
                let touch_state = touch_state.clone();
                let process = process.clone();
                Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
                    touch_state.borrow_mut().end();
                    process();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .ok();
            // Wheel zoom
            let wheel_cb = {
                let touch_state = touch_state.clone();
                let process = process.clone();
                Closure::wrap(Box::new(move |e: web_sys::WheelEvent| {
                    e.prevent_default();
                    touch_state.borrow_mut().wheel(e.delta_y());
                    process();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .ok();
            let contextmenu_cb = {
                Closure::wrap(Box::new(move |e: web_sys::Event| {
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "contextmenu",
                    contextmenu_cb.as_ref().unchecked_ref(),
                )
                .ok();
            // Keys: 'd' toggles drag mode, 'r' resets the view
            let keydown_cb = {
                let pixel_canvas = pixel_canvas.clone();
                let draw = draw_closure.clone();
                let force_update = force_update.clone();
                Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
                    match e.key().as_str() {
                        "d" | "D" => {
                            let mut pc = pixel_canvas.borrow_mut();
                            let next = pc.mode().toggled();
                            pc.set_mode(next);
                        }
                        "r" | "R" => pixel_canvas.borrow_mut().reset_view(),
                        _ => return,
                    }
                    pixel_canvas.borrow_mut().take_dirty();
                    draw();
                    force_update.force_update();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                .ok();
            let resize_cb = {
                let apply_canvas_size = apply_canvas_size.clone();
                let draw = draw_closure.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    apply_canvas_size();
                    draw();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();
            // Touch
            let touch_start_cb = {
                let canvas_tc = canvas.clone();
                let touch_state = touch_state.clone();
                let process = process.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let points = touch_points(&canvas_tc, &e);
                    {
                        let mut ts = touch_state.borrow_mut();
                        match points.as_slice() {
                            [p] => ts.begin(p.0, p.1, js_sys::Date::now()),
                            [a, b, ..] => ts.begin_pinch(*a, *b),
                            [] => {}
                        }
                    }
                    process();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                )
                .ok();
            let touch_move_cb = {
                let canvas_tc = canvas.clone();
                let touch_state = touch_state.clone();
                let process = process.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let points = touch_points(&canvas_tc, &e);
                    {
                        let mut ts = touch_state.borrow_mut();
                        match points.as_slice() {
                            [p] => ts.drag(p.0, p.1),
                            [a, b, ..] => ts.pinch_move(*a, *b),
                            [] => {}
                        }
                    }
                    process();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                )
                .ok();
            let touch_end_cb = {
                let touch_state = touch_state.clone();
                let process = process.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    {
                        let mut ts = touch_state.borrow_mut();
                        if e.touches().length() == 0 {
                            ts.end();
                        } else if ts.pinch {
                            // one finger left after a pinch: wait for a fresh touch
                            ts.pinch = false;
                        }
                    }
                    process();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();
            canvas
                .add_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                )
                .ok();
            // Cleanup
            let window_clone = window.clone();
            move || {
                let _ = canvas.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "wheel",
                    wheel_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "contextmenu",
                    contextmenu_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "keydown",
                    keydown_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                *draw_ref_setup.borrow_mut() = None;
                let _keep_alive = (
                    &mousedown_cb,
                    &mousemove_cb,
                    &mouseup_cb,
                    &wheel_cb,
                    &contextmenu_cb,
                    &keydown_cb,
                    &resize_cb,
                    &touch_start_cb,
                    &touch_move_cb,
                    &touch_end_cb,
                );
            }
        });
    }

    // Export: the cheapest command reproducing the grid
    let send_cb: Callback<()> = {
        let pixel_canvas = pixel_canvas.clone();
        let last_export = last_export.clone();
        let activity = activity.clone();
        Callback::from(move |()| {
            let cmd = LedCommand::for_grid(pixel_canvas.borrow().grid());
            clog(&cmd.describe());
            push_activity(&activity, cmd.log_line());
            last_export.set(Some(cmd));
        })
    };
    let fill_cb: Callback<bool> = {
        let pixel_canvas = pixel_canvas.clone();
        let draw_ref = draw_ref.clone();
        let send_cb = send_cb.clone();
        let real_time = props.settings.real_time;
        let force_update = force_update.clone();
        Callback::from(move |value: bool| {
            {
                let mut pc = pixel_canvas.borrow_mut();
                pc.fill_all(value);
                pc.take_dirty();
            }
            redraw(&draw_ref);
            if real_time {
                send_cb.emit(());
            } else {
                force_update.force_update();
            }
        })
    };
    let set_mode_cb: Callback<Mode> = {
        let pixel_canvas = pixel_canvas.clone();
        let force_update = force_update.clone();
        Callback::from(move |mode: Mode| {
            pixel_canvas.borrow_mut().set_mode(mode);
            force_update.force_update();
        })
    };
    // Camera buttons go through the same gated path as gestures
    let camera_event_cb = |event: InputEvent| {
        let pixel_canvas = pixel_canvas.clone();
        let canvas_ref = canvas_ref.clone();
        let draw_ref = draw_ref.clone();
        let force_update = force_update.clone();
        Callback::from(move |()| {
            let width = canvas_ref
                .cast::<HtmlCanvasElement>()
                .map(|c| c.width())
                .unwrap_or(0);
            let dirty = {
                let mut pc = pixel_canvas.borrow_mut();
                pc.handle(event, width);
                pc.take_dirty()
            };
            if dirty {
                redraw(&draw_ref);
                force_update.force_update();
            }
        })
    };
    let reset_view_cb: Callback<()> = {
        let pixel_canvas = pixel_canvas.clone();
        let draw_ref = draw_ref.clone();
        let force_update = force_update.clone();
        Callback::from(move |()| {
            {
                let mut pc = pixel_canvas.borrow_mut();
                pc.reset_view();
                pc.take_dirty();
            }
            redraw(&draw_ref);
            force_update.force_update();
        })
    };
    let open_settings_cb: Callback<()> = {
        let open_settings = open_settings.clone();
        Callback::from(move |()| open_settings.set(true))
    };
    let close_settings_cb: Callback<()> = {
        let open_settings = open_settings.clone();
        Callback::from(move |()| open_settings.set(false))
    };
    let settings_action_cb = |action: fn() -> SettingsAction| {
        let settings = props.settings.clone();
        Callback::from(move |()| settings.dispatch(action()))
    };
    let reset_settings_cb: Callback<()> = {
        let settings = props.settings.clone();
        Callback::from(move |()| {
            Settings::clear_stored();
            settings.dispatch(SettingsAction::Reset);
        })
    };

    let pc = pixel_canvas.borrow();
    let mode = pc.mode();
    let camera = pc.camera().clone();
    let view_moved = !camera.is_identity();
    let lit = pc.grid().lit_count();
    drop(pc);
    let activity_lines = activity.borrow().clone();

    html! {<div style="position:relative; width:100vw; height:100vh; display:flex; align-items:center; justify-content:center; background:#0e1116;">
        <canvas ref={canvas_ref.clone()} id="pixel-canvas" style="display:block; touch-action:none;"></canvas>
        <StatsPanel mode={mode} lit={lit} scale={camera.scale} translate_x={camera.translate_x} translate_y={camera.translate_y} />
        <ControlsPanel mode={mode} real_time={props.settings.real_time} on_set_mode={set_mode_cb} on_fill={fill_cb} on_send={send_cb} on_open_settings={open_settings_cb} />
        { if mode == Mode::Drag { html!{
            <CameraControls
                on_zoom_in={camera_event_cb(InputEvent::Pinch { factor: 1.25 })}
                on_zoom_out={camera_event_cb(InputEvent::Pinch { factor: 0.8 })}
                on_pan_left={camera_event_cb(InputEvent::Scroll { dx: PAN_STEP, dy: 0.0 })}
                on_pan_right={camera_event_cb(InputEvent::Scroll { dx: -PAN_STEP, dy: 0.0 })}
                on_pan_up={camera_event_cb(InputEvent::Scroll { dx: 0.0, dy: PAN_STEP })}
                on_pan_down={camera_event_cb(InputEvent::Scroll { dx: 0.0, dy: -PAN_STEP })}
                can_reset={view_moved}
                on_reset={reset_view_cb} />
        } } else { html!{} } }
        <ExportPanel command={(*last_export).clone()} activity={activity_lines} />
        <SettingsModal show={*open_settings} on_close={close_settings_cb}
            show_grid_lines={props.settings.show_grid_lines} on_toggle_grid_lines={settings_action_cb(|| SettingsAction::ToggleGridLines)}
            real_time={props.settings.real_time} on_toggle_real_time={settings_action_cb(|| SettingsAction::ToggleRealTime)}
            start_in_drag_mode={props.settings.start_in_drag_mode} on_toggle_start_in_drag={settings_action_cb(|| SettingsAction::ToggleStartInDrag)}
            on_reset={reset_settings_cb} />
    </div> }
}
