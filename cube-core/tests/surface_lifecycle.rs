use std::cell::RefCell;
use std::rc::Rc;

use cube_core::geometry::Wireframe;
use cube_core::{CoreError, Frame, RenderSurface, Result, SurfaceConfig, SurfaceHost};
use nalgebra::Vector3;

/// Counts every resource a surface takes and gives back
#[derive(Debug, Default)]
struct Ledger {
    contexts_acquired: usize,
    contexts_released: usize,
    listeners_attached: usize,
    listeners_detached: usize,
    next_frame: u32,
    pending: Vec<u32>,
    cancelled: Vec<u32>,
    fired: Vec<u32>,
    draws: usize,
    fail_listeners: bool,
}

impl Ledger {
    /// Pop the oldest outstanding refresh callback, like the host would fire it
    fn fire(&mut self) -> Option<u32> {
        if self.pending.is_empty() {
            return None;
        }
        let handle = self.pending.remove(0);
        self.fired.push(handle);
        Some(handle)
    }
}

struct RecordingHost {
    ledger: Rc<RefCell<Ledger>>,
}

impl SurfaceHost for RecordingHost {
    type Container = &'static str;
    type Context = u32;
    type Listeners = ();
    type FrameHandle = u32;

    fn acquire_context(
        &mut self,
        _container: &Self::Container,
        config: &SurfaceConfig,
        wireframe: &Wireframe,
    ) -> Result<u32> {
        assert_eq!(config.size, 200);
        assert_eq!(wireframe.edges.len(), 18);
        let mut ledger = self.ledger.borrow_mut();
        ledger.contexts_acquired += 1;
        Ok(ledger.contexts_acquired as u32)
    }

    fn release_context(&mut self, _container: &Self::Container, _context: u32) {
        self.ledger.borrow_mut().contexts_released += 1;
    }

    fn attach_listeners(&mut self, _container: &Self::Container) -> Result<()> {
        let mut ledger = self.ledger.borrow_mut();
        if ledger.fail_listeners {
            return Err(CoreError::Host("listener registration refused".into()));
        }
        ledger.listeners_attached += 1;
        Ok(())
    }

    fn detach_listeners(&mut self, _container: &Self::Container, _listeners: ()) {
        self.ledger.borrow_mut().listeners_detached += 1;
    }

    fn request_frame(&mut self) -> Result<u32> {
        let mut ledger = self.ledger.borrow_mut();
        ledger.next_frame += 1;
        let handle = ledger.next_frame;
        ledger.pending.push(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: u32) {
        let mut ledger = self.ledger.borrow_mut();
        ledger.pending.retain(|&h| h != handle);
        ledger.cancelled.push(handle);
    }

    fn draw(&mut self, _context: &mut u32, frame: &Frame<'_>) -> Result<()> {
        assert!(frame.mvp().iter().all(|v| v.is_finite()));
        self.ledger.borrow_mut().draws += 1;
        Ok(())
    }
}

fn mount(ledger: &Rc<RefCell<Ledger>>) -> RenderSurface<RecordingHost> {
    let host = RecordingHost {
        ledger: Rc::clone(ledger),
    };
    RenderSurface::mount(host, Some("cube-1"), SurfaceConfig::default())
        .expect("mount succeeds")
        .expect("container present")
}

#[test]
fn missing_container_acquires_nothing() {
    let ledger = Rc::new(RefCell::new(Ledger::default()));
    let host = RecordingHost {
        ledger: Rc::clone(&ledger),
    };

    let surface = RenderSurface::mount(host, None, SurfaceConfig::default()).unwrap();
    assert!(surface.is_none());

    let ledger = ledger.borrow();
    assert_eq!(ledger.contexts_acquired, 0);
    assert_eq!(ledger.listeners_attached, 0);
    assert_eq!(ledger.next_frame, 0);
}

#[test]
fn mount_draws_and_schedules_first_frame() {
    let ledger = Rc::new(RefCell::new(Ledger::default()));
    let surface = mount(&ledger);

    assert!(surface.has_pending_frame());
    assert_eq!(ledger.borrow().draws, 1);
    assert_eq!(ledger.borrow().pending, vec![1]);
}

#[test]
fn every_frame_reschedules_itself() {
    let ledger = Rc::new(RefCell::new(Ledger::default()));
    let mut surface = mount(&ledger);

    for i in 0..10u32 {
        let fired = ledger.borrow_mut().fire();
        assert!(fired.is_some());
        surface.on_frame(f64::from(i) * 16.0).unwrap();
    }

    let ledger_ref = ledger.borrow();
    assert_eq!(ledger_ref.draws, 11);
    assert_eq!(ledger_ref.pending.len(), 1);
    let rotation = surface.scene().transform().rotation;
    assert!((rotation.x - 0.1).abs() < 1e-5);
    assert!((rotation.y - 0.1).abs() < 1e-5);
}

#[test]
fn mount_unmount_cycles_do_not_leak() {
    let ledger = Rc::new(RefCell::new(Ledger::default()));

    for cycle in 0..5u32 {
        let mut surface = mount(&ledger);
        for frame in 0..cycle {
            ledger.borrow_mut().fire();
            surface.on_frame(f64::from(frame) * 16.0).unwrap();
        }
        surface.unmount();

        let ledger = ledger.borrow();
        assert_eq!(ledger.contexts_acquired, ledger.contexts_released);
        assert_eq!(ledger.listeners_attached, ledger.listeners_detached);
        assert!(ledger.pending.is_empty(), "refresh callback outlived unmount");
    }

    let mut ledger = ledger.borrow_mut();
    assert_eq!(ledger.contexts_acquired, 5);
    assert_eq!(ledger.cancelled.len(), 5);
    assert!(ledger.fire().is_none());
}

#[test]
fn failed_mount_releases_partial_acquisition() {
    let ledger = Rc::new(RefCell::new(Ledger {
        fail_listeners: true,
        ..Ledger::default()
    }));
    let host = RecordingHost {
        ledger: Rc::clone(&ledger),
    };

    let result = RenderSurface::mount(host, Some("cube-1"), SurfaceConfig::default());
    assert!(matches!(result, Err(CoreError::Host(_))));

    let ledger = ledger.borrow();
    assert_eq!(ledger.contexts_acquired, 1);
    assert_eq!(ledger.contexts_released, 1);
    assert!(ledger.pending.is_empty());
}

#[test]
fn independent_surfaces_do_not_share_state() {
    let ledger = Rc::new(RefCell::new(Ledger::default()));
    let mut first = mount(&ledger);
    let mut second = mount(&ledger);

    first.pointer_enter();
    first.on_frame(0.0).unwrap();
    first.on_frame(400.0).unwrap();
    second.on_frame(0.0).unwrap();

    assert!((first.scene().transform().scale() - Vector3::repeat(1.2)).norm() < 1e-5);
    assert_eq!(second.scene().transform().scale(), Vector3::repeat(1.0));
    assert!(first.scene().transform().rotation.x > second.scene().transform().rotation.x);
}

#[test]
fn hover_enter_then_leave_settles_at_rest() {
    let ledger = Rc::new(RefCell::new(Ledger::default()));
    let mut surface = mount(&ledger);

    surface.pointer_enter();
    surface.pointer_leave();
    assert_eq!(surface.scene().hover().target(), Vector3::repeat(1.0));

    let mut now = 0.0;
    for _ in 0..40 {
        surface.on_frame(now).unwrap();
        now += 16.0;
    }
    assert!((surface.scene().transform().scale() - Vector3::repeat(1.0)).norm() < 1e-5);
    assert!(!surface.scene().hover().is_animating());
}
