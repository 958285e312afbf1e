use std::io::{BufRead, Write};
use std::path::Path;

use thiserror::Error;

use crate::problem::{Instance, Item};
use crate::solver::solution::route::Route;
use crate::solver::solution::solution::Solution;
use crate::solver::solution::stack_set::StackSet;

/// Identifier written on the first line of every solution file.
const RUN_IDENTIFIER: &str = "stowage";

#[derive(Debug, Error)]
pub enum SolutionFileError {
    #[error("failed to read solution file: {0}")]
    Io(#[from] std::io::Error),

    #[error("solution file ended before the header was complete")]
    MissingHeader,

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("solution is for instance {found}, expected {expected}")]
    InstanceMismatch { expected: u64, found: u64 },
}

fn malformed(line: usize, message: impl Into<String>) -> SolutionFileError {
    SolutionFileError::Malformed {
        line,
        message: message.into(),
    }
}

/// Writes the line-oriented solution format: a header (identifier, instance
/// id, route count) followed by one `V{route},{node},S{stack},<items>` line
/// per (route, leg, stack), items front to rear. The depot leg prints node
/// `0`; customers are 1-based.
pub fn write_solution<W: Write>(
    writer: &mut W,
    instance: &Instance,
    solution: &Solution,
) -> std::io::Result<()> {
    writeln!(writer, "{RUN_IDENTIFIER}")?;
    writeln!(writer, "{}", instance.instance_id())?;
    writeln!(writer, "{}", solution.num_routes())?;

    for (route_index, route) in solution.routes().iter().enumerate() {
        let nodes = std::iter::once(0).chain(route.customers().iter().map(|&c| c + 1));

        for (leg, node) in nodes.enumerate() {
            let stacks = &route.plan()[leg];

            for (stack_index, stack) in stacks.stacks().iter().enumerate() {
                writeln!(
                    writer,
                    "V{},{},S{},{}",
                    route_index + 1,
                    node,
                    stack_index + 1,
                    stack
                )?;
            }
        }
    }

    Ok(())
}

/// Reads a solution file back into a [`Solution`]. Visiting order comes from
/// the `S1` lines in file order; the loading plan from all stacks per leg.
pub fn read_solution<R: BufRead>(
    reader: R,
    instance: &Instance,
) -> Result<Solution, SolutionFileError> {
    let mut lines = reader.lines().enumerate();

    let _identifier = lines.next().ok_or(SolutionFileError::MissingHeader)?.1?;
    let id_line = lines.next().ok_or(SolutionFileError::MissingHeader)?.1?;
    let count_line = lines.next().ok_or(SolutionFileError::MissingHeader)?.1?;

    let found = id_line
        .trim()
        .parse::<u64>()
        .map_err(|_| malformed(2, "instance id is not a number"))?;

    if found != instance.instance_id() {
        return Err(SolutionFileError::InstanceMismatch {
            expected: instance.instance_id(),
            found,
        });
    }

    let num_routes = count_line
        .trim()
        .parse::<usize>()
        .map_err(|_| malformed(3, "route count is not a number"))?;

    let mut customers: Vec<Vec<usize>> = vec![Vec::new(); num_routes];
    let mut plans: Vec<Vec<StackSet>> = vec![Vec::new(); num_routes];

    for (index, line) in lines {
        let line = line?;
        let line_number = index + 1;

        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split(',');

        let route_field = fields
            .next()
            .filter(|field| field.starts_with('V'))
            .ok_or_else(|| malformed(line_number, "expected a V{route} field"))?;
        let node_field = fields
            .next()
            .ok_or_else(|| malformed(line_number, "expected a node field"))?;
        let stack_field = fields
            .next()
            .filter(|field| field.starts_with('S'))
            .ok_or_else(|| malformed(line_number, "expected an S{stack} field"))?;

        let route_index = route_field[1..]
            .parse::<usize>()
            .ok()
            .and_then(|route| route.checked_sub(1))
            .ok_or_else(|| malformed(line_number, "route numbers are 1-based"))?;
        let node = node_field
            .parse::<usize>()
            .map_err(|_| malformed(line_number, "node is not a number"))?;
        let stack_index = stack_field[1..]
            .parse::<usize>()
            .ok()
            .and_then(|stack| stack.checked_sub(1))
            .ok_or_else(|| malformed(line_number, "stack numbers are 1-based"))?;

        if route_index >= num_routes {
            return Err(malformed(line_number, "route number out of range"));
        }

        if stack_index >= instance.num_stacks() {
            return Err(malformed(line_number, "stack number out of range"));
        }

        if node > 0 {
            let customer = node - 1;
            if customer >= instance.num_customers() {
                return Err(malformed(line_number, "node out of range"));
            }

            if !customers[route_index].contains(&customer) {
                customers[route_index].push(customer);
            }
        }

        if stack_index == 0 {
            plans[route_index].push(StackSet::new(instance.num_stacks()));
        }

        let stacks = plans[route_index]
            .last_mut()
            .ok_or_else(|| malformed(line_number, "stack line before its S1 line"))?;

        for code in fields.filter(|code| !code.is_empty()) {
            let customer = code[1..]
                .parse::<usize>()
                .ok()
                .and_then(|customer| customer.checked_sub(1))
                .filter(|&customer| customer < instance.num_customers())
                .ok_or_else(|| malformed(line_number, "item code out of range"))?;

            let item = match &code[..1] {
                "d" => Item::delivery(instance, customer),
                "p" => Item::pickup(instance, customer),
                _ => return Err(malformed(line_number, "item code must start with d or p")),
            };

            // Items are listed front to rear; pushing each to the rear
            // rebuilds the stack in order.
            stacks.stack_mut(stack_index).push_rear(item);
        }
    }

    let routes = customers
        .into_iter()
        .zip(plans)
        .map(|(customers, plan)| Route::new(customers, plan))
        .collect();

    Ok(Solution::new(routes, Vec::new()))
}

pub fn save<P: AsRef<Path>>(
    path: P,
    instance: &Instance,
    solution: &Solution,
) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_solution(&mut file, instance, solution)
}

pub fn load<P: AsRef<Path>>(
    path: P,
    instance: &Instance,
) -> Result<Solution, SolutionFileError> {
    let file = std::fs::File::open(path)?;
    read_solution(std::io::BufReader::new(file), instance)
}
