use gridsnake_core::{BodyView, CellIndex, GridWidth};
use gridsnake_system_food::{FirstFree, FoodPlacement, FoodPolicy, Scheduled, Seeded};

fn body_of(indices: &[u32]) -> Vec<CellIndex> {
    indices.iter().copied().map(CellIndex::new).collect()
}

#[test]
fn first_free_scans_in_row_major_order() {
    let cells = body_of(&[0, 1, 2, 3]);
    let body = BodyView::new(&cells, GridWidth::new(4));
    assert_eq!(FirstFree.place(body), Some(CellIndex::new(4)));
}

#[test]
fn seeded_placement_is_reproducible() {
    let cells = body_of(&[12, 13, 14]);
    let body = BodyView::new(&cells, GridWidth::new(6));

    let mut first = Seeded::new(0x5eed_cafe);
    let mut second = Seeded::new(0x5eed_cafe);
    let first_sequence: Vec<_> = (0..16).map(|_| first.place(body)).collect();
    let second_sequence: Vec<_> = (0..16).map(|_| second.place(body)).collect();

    assert_eq!(first_sequence, second_sequence);
}

#[test]
fn seeded_placement_never_lands_on_body() {
    let cells = body_of(&[0, 1, 2, 5, 8, 7]);
    let body = BodyView::new(&cells, GridWidth::new(3));
    let mut seeded = Seeded::new(99);

    for _ in 0..64 {
        let cell = seeded.place(body).expect("free cell exists");
        assert!(!body.contains(cell), "food placed on body cell {cell:?}");
        assert!(GridWidth::new(3).contains(cell));
    }
}

#[test]
fn scheduled_skips_occupied_and_out_of_range_cells() {
    let cells = body_of(&[4, 5]);
    let body = BodyView::new(&cells, GridWidth::new(3));
    let mut scheduled = Scheduled::new(body_of(&[5, 42, 6]));

    assert_eq!(scheduled.place(body), Some(CellIndex::new(6)));
    assert_eq!(scheduled.remaining(), 0);
}

#[test]
fn scheduled_falls_back_to_first_free() {
    let cells = body_of(&[0]);
    let body = BodyView::new(&cells, GridWidth::new(3));
    let mut scheduled = Scheduled::new(Vec::new());

    assert_eq!(scheduled.place(body), Some(CellIndex::new(1)));
}

#[test]
fn policy_builds_matching_strategy() {
    let cells = body_of(&[0]);
    let body = BodyView::new(&cells, GridWidth::new(3));

    let mut scripted = FoodPolicy::Scheduled(body_of(&[8])).build();
    assert_eq!(scripted.place(body), Some(CellIndex::new(8)));

    let mut default = FoodPolicy::default().build();
    assert_eq!(default.place(body), Some(CellIndex::new(1)));

    let mut seeded_policy = FoodPolicy::Seeded(3).build();
    let mut seeded = Seeded::new(3);
    assert_eq!(seeded_policy.place(body), seeded.place(body));
}
