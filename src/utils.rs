//! Utils

use clap::Parser;

/// Arguments for the planning examples
///
/// The planning currency always comes from the fixture set.
#[derive(Debug, Parser)]
pub struct ExamplePlanArgs {
    /// Fixture set to load the catalog & cart from
    #[clap(short, long, default_value = "garages")]
    pub fixture: String,

    /// Print an order request per seller for the chosen plan
    #[clap(short, long)]
    pub orders: bool,

    /// Largest seller set the minimum-seller-set search explores (unbounded when omitted)
    #[clap(long, env = "CARTPLAN_MAX_SELLER_SET_SIZE")]
    pub max_seller_set_size: Option<usize>,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_fixture_and_planner_flags() -> TestResult {
        let args = ExamplePlanArgs::try_parse_from([
            "plan_cart",
            "--fixture",
            "two_sellers",
            "--orders",
            "--max-seller-set-size",
            "2",
        ])?;

        assert_eq!(args.fixture, "two_sellers");
        assert!(args.orders);
        assert_eq!(args.max_seller_set_size, Some(2));

        Ok(())
    }

    #[test]
    fn currency_is_not_an_example_flag() {
        let result = ExamplePlanArgs::try_parse_from(["plan_cart", "--currency", "GBP"]);

        assert!(result.is_err());
    }
}
