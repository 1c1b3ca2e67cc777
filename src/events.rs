use crate::constants::*;
use crate::dom;
use crate::input;
use osmo_core::{DrawingSurface, InteractionSink, PointerInput, Scene, SceneRunner};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

/// Event listeners owned by one mount; teardown detaches them.
#[derive(Default)]
pub struct Listeners(Vec<Listener>);

impl Listeners {
    pub fn add(
        &mut self,
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<()> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(dom::js_err)?;
        self.0.push(Listener {
            target: target.clone(),
            event,
            closure,
        });
        Ok(())
    }

    pub fn remove_all(&mut self) {
        for l in self.0.drain(..) {
            _ = l
                .target
                .remove_event_listener_with_callback(l.event, l.closure.as_ref().unchecked_ref());
        }
    }
}

/// Forward pointer enter/leave/move/click on `el` to the scene.
pub fn wire_pointer<S, D>(
    listeners: &mut Listeners,
    el: &web::Element,
    runner: &SceneRunner<S, D>,
) -> anyhow::Result<()>
where
    S: Scene + InteractionSink + 'static,
    D: DrawingSurface + 'static,
{
    let target: &web::EventTarget = el.as_ref();

    for (event, input) in [
        (EV_POINTER_ENTER, PointerInput::Enter),
        (EV_POINTER_LEAVE, PointerInput::Leave),
        (EV_CLICK, PointerInput::Click),
    ] {
        let r = runner.clone();
        listeners.add(target, event, move |_| {
            r.with_scene(|s| s.dispatch(input, instant::now()));
        })?;
    }

    let r = runner.clone();
    let el_move = el.clone();
    listeners.add(target, EV_POINTER_MOVE, move |ev| {
        let Some(me) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        r.with_scene(|s| {
            let pos = input::pointer_scene_px(me, &el_move, s.surface_size());
            s.dispatch(PointerInput::Move(pos), instant::now());
        });
    })?;

    Ok(())
}

/// Re-measure the window on resize; the runner decides whether the scene
/// needs a new population.
pub fn wire_window_resize<S, D>(
    listeners: &mut Listeners,
    window: &web::Window,
    runner: &SceneRunner<S, D>,
) -> anyhow::Result<()>
where
    S: Scene + 'static,
    D: DrawingSurface + 'static,
{
    let r = runner.clone();
    listeners.add(window.as_ref(), EV_RESIZE, move |_| {
        r.resize(dom::viewport_size(), instant::now());
    })
}
