//! Entry points for first- and second-order initial value problems.
//!
//! Every entry point returns an [`IvpRecord`]; failures are reported as
//! [`IvpRecord::Failed`] and never panic.

use log::{debug, warn};

use crate::{
    Float,
    error::{Error, Result},
    grid::SampleGrid,
    methods::bidirectional::{Trajectory, integrate_scalar, integrate_system},
    symbolic::{first_order, second_order},
};

use super::{
    backend::{InitialCondition, SymbolicSolver},
    options::{IvpOptions, Method, XRange},
    solution::{IvpRecord, IvpReport, Solution},
};

/// Solve y' = f(x, y) with y(x0) = y0.
///
/// `equation` is either the right-hand side (`"-2*y"`) or an equation in
/// y' (`"y' + 2*y = 0"`).
///
/// # Example
///
/// ```
/// use gridivp::prelude::*;
///
/// let options = IvpOptions::builder().x_range(XRange::new(0.0, 1.0, 11)).build();
/// let record = solve_first_order_ivp("y' = y", 0.0, 1.0, options);
/// let y = record.report().and_then(|r| r.y_values()).unwrap();
/// assert!((y[10] - 1.0_f64.exp() as Float).abs() < 1e-5);
/// ```
pub fn solve_first_order_ivp(equation: &str, x0: Float, y0: Float, options: IvpOptions) -> IvpRecord {
    debug!("first-order IVP: {equation:?}, x0 = {x0}, y0 = {y0}, method = {}", options.method.as_str());
    let record: IvpRecord = first_order_report(equation, x0, y0, &options).into();
    log_outcome(&record);
    record
}

/// Solve y'' = f(x, y, y') with y(x0) = y0 and y'(x0) = y_prime0.
///
/// `equation` is either the right-hand side in x, y and y' (`"-y"`) or an
/// equation in y'' (`"y'' + y = 0"`).
pub fn solve_second_order_ivp(
    equation: &str,
    x0: Float,
    y0: Float,
    y_prime0: Float,
    options: IvpOptions,
) -> IvpRecord {
    debug!(
        "second-order IVP: {equation:?}, x0 = {x0}, y0 = {y0}, y'0 = {y_prime0}, method = {}",
        options.method.as_str()
    );
    let record: IvpRecord = second_order_report(equation, x0, y0, y_prime0, &options).into();
    log_outcome(&record);
    record
}

/// Numerical solve of an equation of the given `order` over `x_range`.
///
/// Order 2 requires `y_prime0`. The order is validated first, so an
/// unsupported order is reported even when `y_prime0` is missing.
pub fn solve_ivp_numerically(
    equation: &str,
    x0: Float,
    y0: Float,
    x_range: impl Into<XRange>,
    order: i64,
    y_prime0: Option<Float>,
) -> IvpRecord {
    let options = IvpOptions::builder()
        .method(Method::Numerical)
        .x_range(x_range)
        .build();
    match (order, y_prime0) {
        (1, _) => solve_first_order_ivp(equation, x0, y0, options),
        (2, Some(y_prime0)) => solve_second_order_ivp(equation, x0, y0, y_prime0, options),
        (2, None) => IvpRecord::Failed(Error::MissingInitialCondition(
            "y'(x0) is required for a second-order IVP".into(),
        )),
        (order, _) => IvpRecord::Failed(Error::UnsupportedOrder(order)),
    }
}

fn first_order_report(equation: &str, x0: Float, y0: Float, options: &IvpOptions) -> Result<IvpReport> {
    ensure_finite("x0", x0)?;
    ensure_finite("y0", y0)?;
    let vars = &options.variables;
    let conditions = [InitialCondition::value(x0, y0)];
    let mut steps = vec![
        "First-order initial value problem".to_string(),
        format!("Initial condition: {}", conditions[0].describe(vars)),
    ];

    if options.method == Method::Symbolic {
        return symbolic_report(equation, &conditions, options.symbolic, steps);
    }

    steps.push("Using the classical 4th-order Runge-Kutta method (RK4)".into());
    let problem = first_order(equation, vars)?;
    steps.push(format!("Right-hand side: {problem}"));
    let (range, grid, start) = prepare_grid(x0, options.x_range)?;
    let trajectory = integrate_scalar(&problem, &grid, start, y0)?;

    steps.push(range_step(&range));
    steps.push(format!(
        "Initial value verified: {}({}) = {}",
        vars.dependent, grid[start], trajectory.y[start]
    ));
    steps.push(format!("Numerical solution computed at {} points", trajectory.len()));
    steps.push(sample_step(&trajectory));
    Ok(IvpReport {
        solution: Solution::Numerical(trajectory),
        method: Method::Numerical,
        steps,
    })
}

fn second_order_report(
    equation: &str,
    x0: Float,
    y0: Float,
    y_prime0: Float,
    options: &IvpOptions,
) -> Result<IvpReport> {
    ensure_finite("x0", x0)?;
    ensure_finite("y0", y0)?;
    ensure_finite("y'0", y_prime0)?;
    let vars = &options.variables;
    let conditions = [InitialCondition::value(x0, y0), InitialCondition::slope(x0, y_prime0)];
    let mut steps = vec![
        "Second-order initial value problem".to_string(),
        format!(
            "Initial conditions: {}, {}",
            conditions[0].describe(vars),
            conditions[1].describe(vars)
        ),
    ];

    if options.method == Method::Symbolic {
        return symbolic_report(equation, &conditions, options.symbolic, steps);
    }

    steps.push("Using the classical 4th-order Runge-Kutta method (RK4) for systems".into());
    let problem = second_order(equation, vars)?;
    steps.push(format!(
        "Reduced to a first-order system with z = {}: {}' = z, z' = {}",
        vars.derivative(1),
        vars.dependent,
        problem.rhs()
    ));
    let (range, grid, start) = prepare_grid(x0, options.x_range)?;
    let trajectory = integrate_system(&problem, &grid, start, y0, y_prime0)?;

    steps.push(range_step(&range));
    let slope_at_start = trajectory.y_prime.as_ref().map_or(y_prime0, |z| z[start]);
    steps.push(format!(
        "Initial conditions verified: {}({x}) = {}, {}({x}) = {}",
        vars.dependent,
        trajectory.y[start],
        vars.derivative(1),
        slope_at_start,
        x = grid[start],
    ));
    steps.push(format!("System solved at {} points", trajectory.len()));
    steps.push(sample_step(&trajectory));
    Ok(IvpReport {
        solution: Solution::Numerical(trajectory),
        method: Method::Numerical,
        steps,
    })
}

fn symbolic_report(
    equation: &str,
    conditions: &[InitialCondition],
    backend: Option<&dyn SymbolicSolver>,
    mut steps: Vec<String>,
) -> Result<IvpReport> {
    let backend = backend.ok_or(Error::SymbolicBackendUnavailable)?;
    steps.push("Attempting a closed-form solution under the initial conditions".into());
    let solution = backend.dsolve(equation, conditions).map_err(Error::Symbolic)?;
    steps.push("Solution found".into());
    Ok(IvpReport {
        solution: Solution::Symbolic(solution),
        method: Method::Symbolic,
        steps,
    })
}

/// Resolve the range, build the grid and locate the start index.
fn prepare_grid(x0: Float, x_range: Option<XRange>) -> Result<(XRange, SampleGrid, usize)> {
    let range = x_range.unwrap_or_else(|| XRange::starting_at(x0));
    let grid = range.grid()?;
    let start = grid.nearest_index(x0);
    if x0 < grid.first() || x0 > grid.last() {
        warn!(
            "x0 = {x0} lies outside [{}, {}]; seeding at the nearest grid point x = {}",
            grid.first(),
            grid.last(),
            grid[start]
        );
    }
    Ok((range, grid, start))
}

fn ensure_finite(name: &str, value: Float) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::Domain(format!("{name} must be finite (got {value})")))
    }
}

fn range_step(range: &XRange) -> String {
    format!(
        "Integration range: [{}, {}] with {} points",
        range.x_min, range.x_max, range.num_points
    )
}

/// Points at indices 0, n/4, n/2, 3n/4 and n - 1.
fn sample_step(trajectory: &Trajectory) -> String {
    let n = trajectory.len();
    let points = [0, n / 4, n / 2, 3 * n / 4, n - 1]
        .iter()
        .map(|&i| format!("({:.2}, {:.4})", trajectory.x[i], trajectory.y[i]))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Sample points: {points}")
}

fn log_outcome(record: &IvpRecord) {
    match record {
        IvpRecord::Solved(report) => debug!("solved with {} method", report.method.as_str()),
        IvpRecord::Failed(err) => debug!("solve failed ({}): {err}", err.kind()),
    }
}
