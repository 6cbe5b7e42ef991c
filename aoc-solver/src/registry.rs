//! Solver registry for managing and creating solver instances

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;
use std::collections::BTreeMap;

/// First Advent of Code year
pub const BASE_YEAR: u16 = 2015;
/// Number of years accepted by the registry (2015-2034)
pub const MAX_YEARS: u16 = 20;
/// Days per Advent of Code year (1-25)
pub const DAYS_PER_YEAR: u8 = 25;

/// Reject year/day pairs outside the supported calendar
fn validate_year_day(year: u16, day: u8) -> Result<(), RegistrationError> {
    let year_ok = (BASE_YEAR..BASE_YEAR + MAX_YEARS).contains(&year);
    let day_ok = (1..=DAYS_PER_YEAR).contains(&day);
    if year_ok && day_ok {
        Ok(())
    } else {
        Err(RegistrationError::InvalidYearDay(year, day))
    }
}

/// Thread-safe factory that parses input into a ready-to-solve instance
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// Metadata about a registered solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    /// The Advent of Code year
    pub year: u16,
    /// The day number (1-25)
    pub day: u8,
    /// Number of parts this solver supports
    pub parts: u8,
}

struct FactoryEntry {
    factory: SolverFactory,
    parts: u8,
}

/// Builder for constructing an immutable [`SolverRegistry`]
///
/// Registration rejects duplicates and year/day pairs outside 2015-2034 / 1-25.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverRegistryBuilder};
///
/// struct Sum;
///
/// impl AocParser for Sum {
///     type SharedData<'a> = Vec<i64>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// impl Solver for Sum {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, _part: u8) -> Result<String, SolveError> {
///         Ok(shared.iter().sum::<i64>().to_string())
///     }
/// }
///
/// let registry = SolverRegistryBuilder::new()
///     .register_solver::<Sum>(2018, 1)
///     .unwrap()
///     .build();
///
/// let mut solver = registry.create_solver(2018, 1, "+1\n-2\n+3").unwrap();
/// assert_eq!(solver.solve(1).unwrap().answer, "2");
/// ```
pub struct SolverRegistryBuilder {
    solvers: BTreeMap<(u16, u8), FactoryEntry>,
}

impl SolverRegistryBuilder {
    /// Create a new empty registry builder
    pub fn new() -> Self {
        Self {
            solvers: BTreeMap::new(),
        }
    }

    /// Register a factory function for a specific year and day
    ///
    /// # Returns
    /// * `Ok(Self)` - Builder with the factory registered, ready for chaining
    /// * `Err(RegistrationError)` - Duplicate or out-of-range year/day
    pub fn register<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        validate_year_day(year, day)?;
        if self.solvers.contains_key(&(year, day)) {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }
        self.solvers.insert(
            (year, day),
            FactoryEntry {
                factory: Box::new(factory),
                parts,
            },
        );
        Ok(self)
    }

    /// Register solver type `S` for a specific year and day
    pub fn register_solver<S>(self, year: u16, day: u8) -> Result<Self, RegistrationError>
    where
        S: Solver + 'static,
    {
        self.register(year, day, S::PARTS, move |input: &str| {
            let instance = SolverInstance::<S>::new(year, day, input)?;
            Ok(Box::new(instance))
        })
    }

    /// Register every plugin submitted via `inventory::submit!`
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Register the plugins for which `filter` returns `true`
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use aoc_solver::SolverRegistryBuilder;
    /// // Register only 2018 solvers tagged "graph"
    /// let registry = SolverRegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.year == 2018 && plugin.tags.contains(&"graph"))
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin>() {
            if filter(plugin) {
                self = plugin.solver.register_with(self, plugin.year, plugin.day)?;
            }
        }
        Ok(self)
    }

    /// Finalize the builder into an immutable registry
    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            solvers: self.solvers,
        }
    }
}

impl Default for SolverRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable map from (year, day) to solver factory
pub struct SolverRegistry {
    solvers: BTreeMap<(u16, u8), FactoryEntry>,
}

impl SolverRegistry {
    /// Parse `input` with the solver registered for `year`/`day`
    ///
    /// # Returns
    /// * `Ok(Box<dyn DynSolver>)` - Parsed solver ready to solve its parts
    /// * `Err(SolverError::NotFound)` - Nothing registered for year/day
    /// * `Err(SolverError::ParseError)` - The solver rejected the input
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let entry = self
            .solvers
            .get(&(year, day))
            .ok_or(SolverError::NotFound(year, day))?;

        (entry.factory)(input).map_err(SolverError::ParseError)
    }

    /// Metadata for every registered solver, ascending by (year, day)
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.solvers.iter().map(|(&(year, day), entry)| FactoryInfo {
            year,
            day,
            parts: entry.parts,
        })
    }

    /// Metadata for one solver
    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        self.solvers.get(&(year, day)).map(|entry| FactoryInfo {
            year,
            day,
            parts: entry.parts,
        })
    }

    /// Check if a solver exists for year/day
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.solvers.contains_key(&(year, day))
    }

    /// Number of registered solvers
    pub fn len(&self) -> usize {
        self.solvers.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.solvers.is_empty()
    }
}

/// Object-safe registration hook so different solver types can sit in one
/// plugin list
///
/// Every `Solver + Sync + 'static` gets this through a blanket impl.
pub trait RegisterableSolver: Sync {
    /// Register this solver type with the builder for a specific year and day
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError>;

    /// Number of parts this solver supports
    fn parts(&self) -> u8;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError> {
        builder.register_solver::<S>(year, day)
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// Plugin information for automatic solver registration
///
/// Usually submitted by `#[derive(AutoRegisterSolver)]`; can also be
/// submitted by hand with `inventory::submit!`.
pub struct SolverPlugin {
    /// The Advent of Code year
    pub year: u16,
    /// The day number (1-25)
    pub day: u8,
    /// The solver instance (type-erased)
    pub solver: &'static dyn RegisterableSolver,
    /// Tags for filtering (e.g. "graph", "parsing")
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);
