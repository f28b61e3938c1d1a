mod common;

use common::{square_image, SIZE};
use livewire::model::Pixel;
use livewire::{CostWeights, LivewireError, Scissors};

fn scissors_for(pixels: &[f32], w: u32, h: u32) -> Scissors {
    Scissors::from_raw_pixel_data(pixels, w, h, None, CostWeights::default()).unwrap()
}

fn square_scissors() -> Scissors {
    let img = square_image();
    scissors_for(&img.grayscale(), img.width, img.height)
}

/// Dark left half, bright right half starting at column 16.
fn step_image() -> Vec<f32> {
    let mut v = vec![0.0f32; (SIZE * SIZE) as usize];
    for y in 0..SIZE {
        for x in 16..SIZE {
            v[(y * SIZE + x) as usize] = 200.0;
        }
    }
    v
}

fn contiguous(path: &[Pixel]) -> bool {
    path.windows(2).all(|w| w[0].touches(w[1]))
}

#[test]
fn path_runs_from_seed_to_target() {
    let mut s = square_scissors();
    s.start_search(Pixel::new(8, 8)).unwrap();
    let path = s.find_path_to_point(Pixel::new(23, 23));
    assert_eq!(path.first(), Some(&Pixel::new(8, 8)));
    assert_eq!(path.last(), Some(&Pixel::new(23, 23)));
    assert!(contiguous(&path));
    // at least the Chebyshev distance plus the seed
    assert!(path.len() >= 16);
}

#[test]
fn path_to_seed_is_the_seed() {
    let mut s = square_scissors();
    s.start_search(Pixel::new(3, 4)).unwrap();
    assert_eq!(s.find_path_to_point(Pixel::new(3, 4)), vec![Pixel::new(3, 4)]);
    assert_eq!(s.path_cost(Pixel::new(3, 4)), Some(0.0));
}

#[test]
fn reseeding_replaces_the_search() {
    let mut s = square_scissors();
    s.start_search(Pixel::new(8, 8)).unwrap();
    s.start_search(Pixel::new(23, 8)).unwrap();
    assert_eq!(s.seed(), Some(Pixel::new(23, 8)));
    let path = s.find_path_to_point(Pixel::new(23, 23));
    assert_eq!(path.first(), Some(&Pixel::new(23, 8)));
}

#[test]
fn out_of_bounds_inputs() {
    let mut s = square_scissors();
    let err = s.start_search(Pixel::new(-1, 3)).unwrap_err();
    assert_eq!(
        err,
        LivewireError::SeedOutOfBounds {
            x: -1,
            y: 3,
            width: SIZE,
            height: SIZE
        }
    );
    assert_eq!(s.seed(), None);
    s.start_search(Pixel::new(0, 0)).unwrap();
    assert!(s.find_path_to_point(Pixel::new(32, 0)).is_empty());
    assert!(s.find_path_to_point(Pixel::new(0, -1)).is_empty());
    assert_eq!(s.path_cost(Pixel::new(40, 40)), None);
}

#[test]
fn path_follows_a_vertical_edge() {
    let mut s = scissors_for(&step_image(), SIZE, SIZE);
    s.start_search(Pixel::new(16, 2)).unwrap();
    let path = s.find_path_to_point(Pixel::new(16, 29));
    assert!(contiguous(&path));
    for p in &path {
        assert!(p.x == 15 || p.x == 16, "left the edge at {:?}", p);
    }
}

#[test]
fn costs_grow_along_the_path() {
    let mut s = square_scissors();
    s.start_search(Pixel::new(2, 30)).unwrap();
    let path = s.find_path_to_point(Pixel::new(29, 3));
    let costs: Vec<f32> = path.iter().map(|p| s.path_cost(*p).unwrap()).collect();
    assert!(costs.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn snap_finds_nearby_edge() {
    let s = scissors_for(&step_image(), SIZE, SIZE);
    let p = s.find_min_nearby(Pixel::new(13, 10), 3);
    assert!(p.x == 15 || p.x == 16, "snapped to {:?}", p);
    assert!((p.y - 10).abs() <= 3);
}

#[test]
fn snap_on_flat_image_keeps_centre() {
    let s = scissors_for(&vec![50.0; (SIZE * SIZE) as usize], SIZE, SIZE);
    assert_eq!(s.find_min_nearby(Pixel::new(10, 12), 4), Pixel::new(10, 12));
    assert_eq!(s.find_min_nearby(Pixel::new(-5, 40), 2), Pixel::new(0, 31));
    assert_eq!(s.find_min_nearby(Pixel::new(7, 7), 0), Pixel::new(7, 7));
}

#[test]
fn searches_share_one_graph() {
    let a = square_scissors();
    let b = Scissors::new(a.graph().clone());
    assert!(std::rc::Rc::ptr_eq(a.graph(), b.graph()));
    assert_eq!(b.seed(), None);
}
