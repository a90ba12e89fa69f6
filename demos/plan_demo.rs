//! Plans across a synthetic room with a doorway and prints the path.
//!
//! Run with `RUST_LOG=debug` to watch propagation and trace decisions.

use kshetra_nav::{io, GridCoord, PotentialPlanner};

fn main() {
    env_logger::init();

    let width = 60;
    let height = 40;

    // vertical wall with a doorway at mid-height
    let mut cells = vec![0u8; width * height];
    for y in 2..height - 2 {
        if (18..=21).contains(&y) {
            continue;
        }
        cells[y * width + 30] = 254;
    }

    let mut planner = PotentialPlanner::new(width, height);
    planner
        .set_cost_map(&cells, true, true)
        .expect("cost map matches planner dimensions");
    planner.set_goal(GridCoord::new(52, 20));
    planner.set_start(GridCoord::new(6, 20));

    match planner.plan_astar() {
        Ok(path) => {
            let path = path.to_vec();
            println!(
                "path found: {} waypoints, cost {:.1}",
                path.len(),
                planner.last_path_cost()
            );
            for p in path {
                println!("  {:.2}, {:.2}", p.x, p.y);
            }
        }
        Err(failure) => {
            eprintln!("planning failed: {failure}");
            io::save_debug_map(
                planner.cost_grid(),
                planner.goal(),
                planner.start(),
                std::path::Path::new("plan_demo_failure"),
            )
            .expect("debug dump is writable");
        }
    }
}
