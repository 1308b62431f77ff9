//! Validates contact symmetry, inverse removal, batching and dirty tracking

use zengrid::GardenError;
use zengrid::catalog::registry::{TypeRegistry, TypeTextures};
use zengrid::spatial::garden::Garden;
use zengrid::spatial::placement::PlacedObject;
use zengrid::spatial::point::{Point, Size};
use zengrid::spatial::SpatialIndex;

fn pond_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    if registry
        .register("pond", Size::new(2, 2), None, TypeTextures::default())
        .is_err()
    {
        unreachable!("valid size rejected at registration");
    }
    registry
}

fn true_contacts(garden: &Garden) -> Vec<Point> {
    let mut cells: Vec<Point> = garden
        .contacts()
        .filter_map(|(offset, value)| value.then_some(offset))
        .collect();
    cells.sort();
    cells
}

#[test]
fn test_ring_keyset_is_exactly_the_perimeter() {
    let registry = pond_registry();
    let Ok(pond) = registry.get("pond") else {
        unreachable!("pond not registered");
    };
    let garden = Garden::new(pond, Point::new(0, 0));

    // 2x2 footprint: 4 cells on each horizontal run, 2 on each vertical
    assert_eq!(garden.contacts().count(), 12);
    assert!(garden.contacts().all(|(_, value)| !value));
    assert!(
        garden
            .contacts()
            .all(|(offset, _)| offset != Point::new(0, 0)),
        "footprint cells must not be tracked as ring cells"
    );
}

#[test]
fn test_set_contact_outside_ring_is_ignored() {
    let registry = pond_registry();
    let Ok(pond) = registry.get("pond") else {
        unreachable!("pond not registered");
    };
    let mut garden = Garden::new(pond, Point::new(0, 0));

    garden.set_contact(Point::new(5, 5), true);
    garden.set_contact(Point::new(0, 0), true);

    assert!(!garden.contact(Point::new(5, 5)));
    assert_eq!(garden.contacts().count(), 12, "keyset must not grow");
}

#[test]
fn test_contact_bitmask_skips_untracked_neighbors() {
    let registry = pond_registry();
    let Ok(pond) = registry.get("pond") else {
        unreachable!("pond not registered");
    };
    let mut garden = Garden::new(pond, Point::new(0, 0));

    // Tracked neighbors of tile (0,0) in scan order: (-1,-1), (0,-1),
    // (1,-1), (-1,0), (-1,1); footprint cells contribute no bit.
    garden.set_contact(Point::new(-1, 0), true);
    assert_eq!(garden.contact_bitmask(Point::new(0, 0)), 1 << 3);

    garden.set_contact(Point::new(-1, -1), true);
    assert_eq!(garden.contact_bitmask(Point::new(0, 0)), (1 << 3) | 1);

    garden.set_contact(Point::new(-1, 1), true);
    assert_eq!(
        garden.contact_bitmask(Point::new(0, 0)),
        (1 << 3) | (1 << 4) | 1
    );
}

#[test]
fn test_contact_bitmask_of_single_cell_tracks_all_eight_neighbors() {
    let mut registry = TypeRegistry::new();
    if registry
        .register("lantern", Size::new(1, 1), None, TypeTextures::default())
        .is_err()
    {
        unreachable!("valid size rejected at registration");
    }
    let Ok(lantern) = registry.get("lantern") else {
        unreachable!("lantern not registered");
    };
    let mut garden = Garden::new(lantern, Point::new(0, 0));
    assert_eq!(garden.contacts().count(), 8);

    // Scan order around (0,0): (-1,-1), (0,-1), (1,-1), (-1,0), (1,0),
    // (-1,1), (0,1), (1,1)
    garden.set_contact(Point::new(1, 0), true);
    assert_eq!(garden.contact_bitmask(Point::new(0, 0)), 1 << 4);

    garden.set_contact(Point::new(1, 1), true);
    assert_eq!(garden.contact_bitmask(Point::new(0, 0)), (1 << 4) | (1 << 7));
}

#[test]
fn test_contact_symmetry_for_touching_footprints() {
    let registry = pond_registry();
    let Ok(pond) = registry.get("pond") else {
        unreachable!("pond not registered");
    };
    let mut index = SpatialIndex::new();

    index.add(pond, Point::new(5, 5));
    index.add(pond, Point::new(7, 5));

    let Some(first) = index.get(Point::new(5, 5)) else {
        unreachable!("first garden missing");
    };
    let Some(second) = index.get(Point::new(7, 5)) else {
        unreachable!("second garden missing");
    };

    assert_eq!(
        true_contacts(first),
        vec![Point::new(2, 0), Point::new(2, 1)],
        "first garden sees the second on its right edge only"
    );
    assert_eq!(
        true_contacts(second),
        vec![Point::new(-1, 0), Point::new(-1, 1)],
        "second garden sees the first on its left edge only"
    );
}

#[test]
fn test_diagonal_corner_touch_marks_single_ring_cell() {
    let registry = pond_registry();
    let Ok(pond) = registry.get("pond") else {
        unreachable!("pond not registered");
    };
    let mut index = SpatialIndex::new();

    index.add(pond, Point::new(0, 0));
    index.add(pond, Point::new(2, 2));

    let Some(first) = index.get(Point::new(0, 0)) else {
        unreachable!("first garden missing");
    };
    assert_eq!(true_contacts(first), vec![Point::new(2, 2)]);
}

#[test]
fn test_add_then_remove_restores_neighbor_state() {
    let registry = pond_registry();
    let Ok(pond) = registry.get("pond") else {
        unreachable!("pond not registered");
    };
    let mut index = SpatialIndex::new();

    index.add(pond, Point::new(5, 5));
    index.add(pond, Point::new(7, 5));

    let removed = match index.remove(pond, Point::new(7, 5)) {
        Ok(garden) => garden,
        Err(error) => unreachable!("removal failed: {error}"),
    };
    assert_eq!(removed.position(), Point::new(7, 5));
    assert!(
        true_contacts(&removed).is_empty(),
        "detached garden's own contacts are cleared"
    );

    let Some(first) = index.get(Point::new(5, 5)) else {
        unreachable!("surviving garden missing");
    };
    assert!(true_contacts(first).is_empty(), "pre-add state restored");
    assert!(index.get(Point::new(7, 5)).is_none());
    assert_eq!(index.len(), 1);
}

#[test]
fn test_remove_resolves_non_top_left_anchor() {
    let registry = pond_registry();
    let Ok(pond) = registry.get("pond") else {
        unreachable!("pond not registered");
    };
    let mut index = SpatialIndex::new();

    index.add(pond, Point::new(5, 5));

    // The placement source may report any cell of the footprint
    let removed = match index.remove(pond, Point::new(6, 6)) {
        Ok(garden) => garden,
        Err(error) => unreachable!("anchor scan failed: {error}"),
    };
    assert_eq!(removed.position(), Point::new(5, 5));
    assert!(index.is_empty());
}

#[test]
fn test_remove_without_matching_garden_is_loud() {
    let registry = pond_registry();
    let Ok(pond) = registry.get("pond") else {
        unreachable!("pond not registered");
    };
    let mut index = SpatialIndex::new();

    match index.remove(pond, Point::new(3, 3)) {
        Err(GardenError::GardenNotFound { position, .. }) => {
            assert_eq!(position, Point::new(3, 3));
        }
        other => unreachable!("expected GardenNotFound, got {other:?}"),
    }
}

#[test]
fn test_flush_recomputes_once_and_is_idempotent() {
    let registry = pond_registry();
    let Ok(pond) = registry.get("pond") else {
        unreachable!("pond not registered");
    };
    let mut index = SpatialIndex::new();

    index.add(pond, Point::new(5, 5));
    index.add(pond, Point::new(7, 5));
    assert!(index.flush().is_ok());

    let Some(first) = index.get(Point::new(5, 5)) else {
        unreachable!("first garden missing");
    };
    let before = first.border_parts().to_vec();
    assert!(!before.is_empty(), "flush populated the border parts");

    // Second flush with nothing dirty must change nothing
    assert!(index.flush().is_ok());
    let Some(first_again) = index.get(Point::new(5, 5)) else {
        unreachable!("first garden missing");
    };
    assert_eq!(first_again.border_parts(), before.as_slice());
}

#[test]
fn test_flush_after_removal_refreshes_neighbors() {
    let registry = pond_registry();
    let Ok(pond) = registry.get("pond") else {
        unreachable!("pond not registered");
    };
    let mut index = SpatialIndex::new();

    index.add(pond, Point::new(5, 5));
    index.add(pond, Point::new(7, 5));
    assert!(index.flush().is_ok());

    if index.remove(pond, Point::new(7, 5)).is_err() {
        unreachable!("removal failed");
    }
    assert!(index.flush().is_ok());

    let Some(first) = index.get(Point::new(5, 5)) else {
        unreachable!("surviving garden missing");
    };
    assert!(
        first.border_parts().iter().all(|part| part.value == 0),
        "no contact bits remain after the neighbor is gone"
    );
}

#[test]
fn test_pond_scenario_produces_nonzero_boundary_bitmasks() {
    let registry = pond_registry();
    let Ok(pond) = registry.get("pond") else {
        unreachable!("pond not registered");
    };
    let mut index = SpatialIndex::new();

    index.add(pond, Point::new(5, 5));
    index.add(pond, Point::new(7, 5));
    assert!(index.flush().is_ok());

    let Some(first) = index.get(Point::new(5, 5)) else {
        unreachable!("first garden missing");
    };
    let Some(second) = index.get(Point::new(7, 5)) else {
        unreachable!("second garden missing");
    };

    assert!(first.contact(Point::new(2, 0)));
    assert!(second.contact(Point::new(-1, 0)));
    assert!(
        first.border_parts().iter().any(|part| part.value != 0),
        "first garden's shared boundary must select a contact variant"
    );
    assert!(
        second.border_parts().iter().any(|part| part.value != 0),
        "second garden's shared boundary must select a contact variant"
    );

    // Right-edge parts carry the contact bits, the left edge stays clear
    assert!(
        first
            .border_parts()
            .iter()
            .filter(|part| part.tile.x == 0)
            .all(|part| part.value == 0)
    );
}

#[test]
fn test_clear_drops_gardens_and_pending_recomputes() {
    let registry = pond_registry();
    let Ok(pond) = registry.get("pond") else {
        unreachable!("pond not registered");
    };
    let mut index = SpatialIndex::new();

    index.add(pond, Point::new(5, 5));
    index.clear();

    assert!(index.is_empty());
    assert!(index.flush().is_ok(), "flush after clear is a no-op");
}

#[test]
fn test_notify_routing_by_type_key() {
    let registry = pond_registry();
    let mut index = SpatialIndex::new();

    let placed = PlacedObject::furniture_at_tile("pond", Point::new(3, 3));
    assert!(index.notify_added(&registry, &placed).is_ok());
    assert!(index.get(Point::new(3, 3)).is_some());

    let stranger = PlacedObject::Structure {
        type_key: "statue".to_string(),
        tile: Point::new(1, 1),
    };
    match index.notify_added(&registry, &stranger) {
        Err(GardenError::UnknownType { key }) => assert_eq!(key, "statue"),
        other => unreachable!("expected UnknownType, got {other:?}"),
    }

    let removed = index.notify_removed(&registry, &placed);
    assert!(removed.is_ok());
    assert!(index.is_empty());
}

#[test]
fn test_furniture_anchor_divides_world_pixels() {
    let object = PlacedObject::Furniture {
        type_key: "pond".to_string(),
        bounds: Point::new(130, 64),
    };
    assert_eq!(object.anchor(), Point::new(2, 1));

    let round_trip = PlacedObject::furniture_at_tile("pond", Point::new(7, 3));
    assert_eq!(round_trip.anchor(), Point::new(7, 3));
}
