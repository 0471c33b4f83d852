//! The scene: the live model, the observer and the per-frame pipeline.
//!
//! Every transform command is applied to the model immediately. The scene also
//! remembers the accumulated observer offset and rotation angles, so an object
//! added later is brought into the same pose as the ones already shown.

use crate::config::{Config, Layout};
use crate::facet::Facet;
use crate::math::vec3::Vec3;
use crate::polyhedron::{CompositePolyhedron, Polyhedron};
use crate::projection::Projection;
use crate::render::Drawer;
use crate::sorting::{clip_by_nearer, sort_farthest_first};
use crate::transform::{self, Axis};

/// Commands the input layer sends to a scene.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Rotate(Axis, f64),
    RotateAroundVector(f64),
    MoveObserver(Vec3),
    MoveDisplay(f64),
    AddObject(Polyhedron),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneState {
    /// No object attached yet.
    Uninitialized,
    Ready,
}

/// Counters from one [`Scene::render`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub facets: usize,
    pub visible_facets: usize,
    pub clipped_pairs: usize,
}

pub struct Scene {
    layout: Layout,
    projection: Projection,
    observer: Vec3,
    axis_angles: [f64; 3],
    vector_angle: f64,
    model: Option<Polyhedron>,
}

impl Scene {
    pub fn new(config: &Config) -> Self {
        Self {
            layout: config.layout,
            projection: Projection::for_viewport(config.display_distance, config.width, config.height),
            observer: config.observer,
            axis_angles: [0.0; 3],
            vector_angle: 0.0,
            model: None,
        }
    }

    pub fn state(&self) -> SceneState {
        match self.model {
            Some(_) => SceneState::Ready,
            None => SceneState::Uninitialized,
        }
    }

    pub fn model(&self) -> Option<&Polyhedron> {
        self.model.as_ref()
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Observer position in the starting model coordinates.
    pub fn observer(&self) -> Vec3 {
        self.observer
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.projection.set_viewport(width, height);
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Rotate(axis, angle) => self.rotate_around_axis(axis, angle),
            Command::RotateAroundVector(angle) => self.rotate_around_vector(angle),
            Command::MoveObserver(delta) => self.move_observer(delta),
            Command::MoveDisplay(delta) => self.move_display(delta),
            Command::AddObject(object) => self.add_object(object),
        }
    }

    /// Rotates every object about the line through its rotation center
    /// parallel to `axis`.
    pub fn rotate_around_axis(&mut self, axis: Axis, angle: f64) {
        self.axis_angles[axis.index()] += angle;
        for object in self.rotating_units() {
            rotate_object(object, axis, angle);
        }
    }

    /// Rotates every object about its own rotation vector.
    pub fn rotate_around_vector(&mut self, angle: f64) {
        self.vector_angle += angle;
        for object in self.rotating_units() {
            rotate_object_around_vector(object, angle);
        }
    }

    /// Moves the observer by `delta`.
    pub fn move_observer(&mut self, delta: Vec3) {
        self.observer = self.observer + delta;
        if let Some(model) = self.model.as_mut() {
            model.transform(&transform::translate_to(delta));
        }
    }

    /// Moves the screen plane along the line of sight.
    pub fn move_display(&mut self, delta: f64) {
        if !self.projection.move_screen(delta) {
            log::warn!("display distance clamped to {}", self.projection.distance());
        }
    }

    pub fn add_object(&mut self, mut object: Polyhedron) {
        match self.layout {
            Layout::Single => {
                object.transform(&transform::translate_to(self.observer));
                self.fast_forward_rotation(&mut object);
                self.model = Some(object);
                log::debug!("object attached, observer at {:?}", self.observer);
            }
            Layout::Ring { radius } => {
                self.fast_forward_rotation(&mut object);
                let composite = match self.model.take() {
                    Some(Polyhedron::Composite(mut ring)) => {
                        ring.push(object);
                        ring
                    }
                    Some(previous) => {
                        let mut ring = CompositePolyhedron::around(previous);
                        ring.push(object);
                        ring
                    }
                    None => CompositePolyhedron::around(object),
                };
                let mut model = Polyhedron::Composite(composite);
                self.observer = arrange_ring(&mut model, radius);
                log::debug!("ring rearranged around {} solids", model.solid_count());
                self.model = Some(model);
            }
        }
    }

    /// Projects, classifies, depth-sorts and clips the model, then hands every
    /// facet to `drawer`: facets facing away first, facets facing the observer
    /// last.
    pub fn render<D: Drawer>(&mut self, surface: &mut D::Surface, drawer: &mut D) -> RenderStats {
        let Some(model) = self.model.as_mut() else {
            return RenderStats::default();
        };
        model.project_and_classify(&self.projection);

        let facets = model.facets_mut();
        let total = facets.len();
        let (mut front, mut back): (Vec<&mut Facet>, Vec<&mut Facet>) =
            facets.into_iter().partition(|f| f.is_visible());

        for facet in &mut back {
            facet.occlude_all();
        }
        sort_farthest_first(&mut front);
        let clipped_pairs = clip_by_nearer(&mut front);

        for facet in back.iter().chain(front.iter()) {
            drawer.draw(surface, facet.edges());
        }

        let stats = RenderStats {
            facets: total,
            visible_facets: front.len(),
            clipped_pairs,
        };
        log::trace!("rendered {stats:?}");
        stats
    }

    /// The objects that rotate independently: the model itself, or each
    /// object of a ring.
    fn rotating_units(&mut self) -> Vec<&mut Polyhedron> {
        match (self.layout, self.model.as_mut()) {
            (_, None) => Vec::new(),
            (Layout::Ring { .. }, Some(Polyhedron::Composite(ring))) => ring.children_mut().iter_mut().collect(),
            (_, Some(model)) => vec![model],
        }
    }

    fn fast_forward_rotation(&self, object: &mut Polyhedron) {
        for axis in Axis::ALL {
            let angle = self.axis_angles[axis.index()];
            if angle != 0.0 {
                rotate_object(object, axis, angle);
            }
        }
        if self.vector_angle != 0.0 {
            rotate_object_around_vector(object, self.vector_angle);
        }
    }
}

fn rotate_object(object: &mut Polyhedron, axis: Axis, angle: f64) {
    let matrix = transform::rotate_about_point_on_axis(axis, object.rotation_center(), angle);
    object.transform(&matrix);
}

fn rotate_object_around_vector(object: &mut Polyhedron, angle: f64) {
    let (from, to) = object.rotation_axis();
    object.transform(&transform::rotate_about_vector(from, to, angle));
}

/// Spreads the ring's objects evenly on a circle in the XY plane (a lone
/// object sits at the origin) and moves the observer to `(0, 0, -radius)`.
/// Returns the new observer position.
fn arrange_ring(model: &mut Polyhedron, radius: f64) -> Vec3 {
    if let Polyhedron::Composite(ring) = model {
        let count = ring.children().len();
        for (i, child) in ring.children_mut().iter_mut().enumerate() {
            let target = if count == 1 {
                Vec3::ZERO
            } else {
                let angle = std::f64::consts::TAU * i as f64 / count as f64;
                Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
            };
            child.move_geometric_center_to(target);
        }
    }
    model.set_rotation_center(Vec3::ZERO);
    model.set_geometric_center(Vec3::ZERO);

    let observer = Vec3::new(0.0, 0.0, -radius);
    model.transform(&transform::translate_to(observer));
    observer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::BoxBuilder;
    use crate::clipper::Edge;
    use crate::render::{Renderer, WireframeDrawer};
    use approx::assert_relative_eq;

    /// Records how many visible and occluded pieces each draw call received.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(usize, usize)>,
    }

    impl Drawer for Recorder {
        type Surface = ();

        fn draw(&mut self, _: &mut (), edges: &[Edge]) {
            let visible = edges.iter().map(|e| e.visible().len()).sum();
            let occluded = edges.iter().map(|e| e.occluded().len()).sum();
            self.calls.push((visible, occluded));
        }
    }

    fn cube() -> Polyhedron {
        BoxBuilder::cube(200.0).build().unwrap()
    }

    fn single_scene() -> Scene {
        Scene::new(&Config::default())
    }

    #[test]
    fn uninitialized_scene_renders_nothing() {
        let mut scene = single_scene();
        scene.rotate_around_axis(Axis::X, 0.3);
        scene.move_observer(Vec3::new(0.0, 0.0, 10.0));
        let mut recorder = Recorder::default();
        assert_eq!(scene.state(), SceneState::Uninitialized);
        assert_eq!(scene.render(&mut (), &mut recorder), RenderStats::default());
        assert!(recorder.calls.is_empty());
        assert_eq!(scene.observer(), Vec3::new(0.0, 0.0, -490.0));
    }

    #[test]
    fn cube_seen_off_axis_shows_three_faces() {
        let mut scene = single_scene();
        scene.add_object(cube());
        assert_eq!(scene.state(), SceneState::Ready);
        scene.rotate_around_axis(Axis::X, 0.5);
        scene.rotate_around_axis(Axis::Y, 0.6);

        let mut recorder = Recorder::default();
        let stats = scene.render(&mut (), &mut recorder);
        assert_eq!(stats.facets, 6);
        assert_eq!(stats.visible_facets, 3);
        // Facets of one convex solid never clip each other.
        assert_eq!(stats.clipped_pairs, 0);
        assert_eq!(recorder.calls.len(), 6);
        // Back faces are drawn first and are fully occluded.
        for &(visible, occluded) in &recorder.calls[..3] {
            assert_eq!((visible, occluded), (0, 4));
        }
        for &(visible, occluded) in &recorder.calls[3..] {
            assert_eq!((visible, occluded), (4, 0));
        }
    }

    #[test]
    fn cube_seen_head_on_shows_one_face() {
        let mut scene = single_scene();
        scene.add_object(cube());
        let stats = scene.render(&mut (), &mut Recorder::default());
        assert_eq!(stats.visible_facets, 1);
    }

    #[test]
    fn added_object_is_fast_forwarded() {
        let mut early = single_scene();
        early.rotate_around_axis(Axis::X, 0.5);
        early.rotate_around_axis(Axis::Y, 0.6);
        early.rotate_around_vector(0.2);
        early.move_observer(Vec3::new(5.0, 0.0, 0.0));
        early.add_object(cube());

        let mut late = single_scene();
        late.move_observer(Vec3::new(5.0, 0.0, 0.0));
        late.add_object(cube());
        late.rotate_around_axis(Axis::X, 0.5);
        late.rotate_around_axis(Axis::Y, 0.6);
        late.rotate_around_vector(0.2);

        let a = early.model().unwrap().facets();
        let b = late.model().unwrap().facets();
        let (Polyhedron::Simple(pa), Polyhedron::Simple(pb)) = (early.model().unwrap(), late.model().unwrap()) else {
            panic!("expected simple polyhedra");
        };
        assert_eq!(a.len(), b.len());
        for (va, vb) in pa.vertices().iter().zip(pb.vertices()) {
            assert_relative_eq!(va.position().x, vb.position().x, epsilon = 1e-6);
            assert_relative_eq!(va.position().y, vb.position().y, epsilon = 1e-6);
            assert_relative_eq!(va.position().z, vb.position().z, epsilon = 1e-6);
        }
    }

    #[test]
    fn single_layout_replaces_the_model() {
        let mut scene = single_scene();
        scene.add_object(cube());
        scene.add_object(BoxBuilder::cube(50.0).repeat(2).build().unwrap());
        assert_eq!(scene.model().unwrap().solid_count(), 2);
        assert_eq!(scene.model().unwrap().facets().len(), 12);
    }

    #[test]
    fn nearer_cube_hides_part_of_farther_cube() {
        let near = BoxBuilder::cube(100.0).build().unwrap();
        let far = BoxBuilder::cube(100.0)
            .centered_at(Vec3::new(60.0, 40.0, 300.0))
            .build()
            .unwrap();
        let pair = CompositePolyhedron::new(vec![near, far], (0, 1), Vec3::ZERO, Vec3::ZERO).unwrap();

        let mut scene = single_scene();
        scene.add_object(pair.into());
        let stats = scene.render(&mut (), &mut Recorder::default());
        assert!(stats.clipped_pairs > 0);

        let Some(Polyhedron::Composite(pair)) = scene.model() else {
            panic!("expected a composite");
        };
        let near_facets = pair.children()[0].facets();
        let far_facets = pair.children()[1].facets();
        assert!(near_facets
            .iter()
            .filter(|f| f.is_visible())
            .all(|f| f.edges().iter().all(|e| e.occluded().is_empty())));
        assert!(far_facets
            .iter()
            .filter(|f| f.is_visible())
            .any(|f| f.edges().iter().any(|e| !e.occluded().is_empty())));
    }

    #[test]
    fn ring_spreads_objects_on_a_circle() {
        let mut scene = Scene::new(&Config {
            layout: Layout::ring(),
            ..Config::default()
        });
        scene.add_object(cube());
        let lone = scene.model().unwrap().facets()[0].owner();
        let center = match scene.model() {
            Some(Polyhedron::Composite(ring)) => ring.children()[0].geometric_center(),
            _ => panic!("expected a ring"),
        };
        assert_eq!(center, Vec3::new(0.0, 0.0, 1000.0));

        scene.add_object(cube());
        scene.add_object(cube());
        assert_eq!(scene.observer(), Vec3::new(0.0, 0.0, -1000.0));
        let Some(Polyhedron::Composite(ring)) = scene.model() else {
            panic!("expected a ring");
        };
        assert_eq!(ring.children().len(), 3);
        assert_eq!(ring.children()[0].facets()[0].owner(), lone);
        let first = ring.children()[0].geometric_center();
        assert_relative_eq!(first.x, 1000.0, epsilon = 1e-9);
        assert_relative_eq!(first.z, 1000.0, epsilon = 1e-9);
        let second = ring.children()[1].geometric_center();
        assert_relative_eq!(second.x, 1000.0 * (std::f64::consts::TAU / 3.0).cos(), epsilon = 1e-9);
        assert_relative_eq!(second.y, 1000.0 * (std::f64::consts::TAU / 3.0).sin(), epsilon = 1e-9);
    }

    #[test]
    fn ring_objects_rotate_about_their_own_centers() {
        let mut scene = Scene::new(&Config {
            layout: Layout::ring(),
            ..Config::default()
        });
        scene.add_object(cube());
        scene.add_object(cube());
        scene.rotate_around_axis(Axis::Z, 1.0);
        let Some(Polyhedron::Composite(ring)) = scene.model() else {
            panic!("expected a ring");
        };
        let first = ring.children()[0].geometric_center();
        assert_relative_eq!(first.x, 1000.0, epsilon = 1e-9);
        assert_relative_eq!(first.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn ring_object_added_later_matches_rotated_ring() {
        let ring = Config {
            layout: Layout::ring(),
            ..Config::default()
        };
        let mut early = Scene::new(&ring);
        early.rotate_around_axis(Axis::X, 0.5);
        early.rotate_around_axis(Axis::Y, 0.6);
        early.add_object(cube());
        early.add_object(cube());

        let mut late = Scene::new(&ring);
        late.add_object(cube());
        late.add_object(cube());
        late.rotate_around_axis(Axis::X, 0.5);
        late.rotate_around_axis(Axis::Y, 0.6);

        let (Some(Polyhedron::Composite(a)), Some(Polyhedron::Composite(b))) = (early.model(), late.model()) else {
            panic!("expected rings");
        };
        assert_eq!(early.observer(), late.observer());
        assert_eq!(a.children().len(), 2);
        for (ca, cb) in a.children().iter().zip(b.children()) {
            let (Polyhedron::Simple(pa), Polyhedron::Simple(pb)) = (ca, cb) else {
                panic!("expected simple polyhedra");
            };
            for (va, vb) in pa.vertices().iter().zip(pb.vertices()) {
                assert_relative_eq!(va.position().x, vb.position().x, epsilon = 1e-6);
                assert_relative_eq!(va.position().y, vb.position().y, epsilon = 1e-6);
                assert_relative_eq!(va.position().z, vb.position().z, epsilon = 1e-6);
            }
            let (ga, gb) = (ca.geometric_center(), cb.geometric_center());
            assert_relative_eq!(ga.x, gb.x, epsilon = 1e-6);
            assert_relative_eq!(ga.y, gb.y, epsilon = 1e-6);
            assert_relative_eq!(ga.z, gb.z, epsilon = 1e-6);
        }
    }

    #[test]
    fn observer_inside_the_cube_still_renders() {
        let mut scene = single_scene();
        scene.add_object(cube());
        scene.rotate_around_axis(Axis::Y, 0.6);
        for _ in 0..45 {
            scene.apply(Command::MoveObserver(Vec3::new(0.0, 0.0, 10.0)));
        }
        let mut renderer = Renderer::new(800, 600);
        let stats = scene.render(&mut renderer, &mut WireframeDrawer::default());
        assert_eq!(stats.facets, 6);
    }

    #[test]
    fn display_distance_is_clamped() {
        let mut scene = single_scene();
        scene.move_display(-10_000.0);
        assert_eq!(scene.projection().distance(), crate::projection::MIN_DISTANCE);
    }

    #[test]
    fn commands_dispatch_to_operations() {
        let mut direct = single_scene();
        direct.add_object(cube());
        direct.rotate_around_axis(Axis::Z, 0.4);
        direct.move_observer(Vec3::new(1.0, 2.0, 3.0));
        direct.move_display(20.0);

        let mut commanded = single_scene();
        for command in [
            Command::AddObject(cube()),
            Command::Rotate(Axis::Z, 0.4),
            Command::MoveObserver(Vec3::new(1.0, 2.0, 3.0)),
            Command::MoveDisplay(20.0),
        ] {
            commanded.apply(command);
        }

        assert_eq!(direct.observer(), commanded.observer());
        assert_eq!(direct.projection(), commanded.projection());
        assert_eq!(
            direct.model().unwrap().geometric_center(),
            commanded.model().unwrap().geometric_center()
        );
    }
}
