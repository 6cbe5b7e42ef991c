//! Advent of Code Solver Library
//!
//! A type-safe framework for puzzle solvers across multiple years and days.
//! Each puzzle is a solver with its own input parsing and one answer per part.
//!
//! # Overview
//!
//! This library provides:
//! - [`AocParser`]: parse the input once into shared data
//! - [`PartSolver`]: solve one part from the shared data
//! - [`Solver`]: dispatch a part number to the right [`PartSolver`]
//!   (usually via `#[derive(AocSolver)]`)
//! - [`SolverRegistry`]: look up solvers by year and day, parse input and
//!   hand back a type-erased [`DynSolver`] that records timings
//! - [`SolverPlugin`]: automatic registration via `inventory`
//!   (usually via `#[derive(AutoRegisterSolver)]`)
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Frequencies;
//!
//! impl AocParser for Frequencies {
//!     type SharedData<'a> = Vec<i32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|line| {
//!                 line.parse()
//!                     .map_err(|_| ParseError::InvalidFormat("Expected integer".to_string()))
//!             })
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Frequencies {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i32>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Frequencies {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.len().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register_solver::<Frequencies>(2018, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2018, 1, "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "6");
//! assert_eq!(solver.solve(2).unwrap().answer, "3");
//! ```
//!
//! # Plugin Registration
//!
//! ```ignore
//! #[derive(AocSolver, AutoRegisterSolver)]
//! #[aoc_solver(max_parts = 2)]
//! #[aoc(year = 2018, day = 7, tags = ["graph"])]
//! pub struct Solver;
//! ```
//!
//! Binaries pick up every plugin linked into them with
//! [`SolverRegistryBuilder::register_all_plugins`].

mod error;
mod instance;
mod registry;
mod solver;

// Re-export public API
pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    BASE_YEAR, DAYS_PER_YEAR, FactoryInfo, MAX_YEARS, RegisterableSolver, SolverFactory,
    SolverPlugin, SolverRegistry, SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

// Re-export the derive macros
pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
