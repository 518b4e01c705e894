/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::debug;
use lumen_filters::params::FilterParams;

use crate::errors::CliErrors;

/// Build the parameter bag from `--params-json` and `--param`
///
/// JSON is read first, every `--param` assignment then overrides it in
/// command line order.
pub fn parse_params(options: &ArgMatches) -> Result<FilterParams, CliErrors> {
    let mut params = match options.get_one::<String>("params-json") {
        Some(json) => serde_json::from_str::<FilterParams>(json)?,
        None => FilterParams::new()
    };

    if let Some(assignments) = options.get_many::<String>("param") {
        for assignment in assignments {
            params.parse_assignment(assignment)?;
        }
    }
    for (name, value) in params.iter() {
        debug!("Parameter {name} = {value}");
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use lumen_filters::params::ParamValue;

    use crate::cmd_args::create_cmd_args;
    use crate::cmd_parsers::params::parse_params;

    fn parse(args: &[&str]) -> Result<lumen_filters::params::FilterParams, crate::errors::CliErrors> {
        let mut full = vec!["lumen", "-i", "in.png", "-o", "out.png", "-f", "otsu"];
        full.extend_from_slice(args);

        let matches = create_cmd_args().try_get_matches_from(full).unwrap();
        parse_params(&matches)
    }

    #[test]
    fn params_from_command_line() {
        let params = parse(&["-p", "sigma=2.5", "--param", "filter_shape=3,5", "-p", "direction=y"]).unwrap();

        assert_eq!(params.get("sigma"), Some(&ParamValue::Float(2.5)));
        assert_eq!(params.pair("filter_shape"), Some((3, 5)));
        assert_eq!(params.text_or("direction", "x"), "y");
    }

    #[test]
    fn param_overrides_json() {
        let params = parse(&["--params-json", r#"{"k": 4, "seed": 7}"#, "-p", "k=2"]).unwrap();

        assert_eq!(params.int_or("k", 0), 2);
        assert_eq!(params.int_or("seed", 0), 7);
    }

    #[test]
    fn bad_input_is_an_error() {
        assert!(parse(&["-p", "sigma"]).is_err());
        assert!(parse(&["--params-json", "[1, 2"]).is_err());
    }
}
