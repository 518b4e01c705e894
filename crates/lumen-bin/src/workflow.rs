/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::{info, warn};
use lumen_filters::filters::Filter;
use lumen_image::image::Image;

use crate::cmd_parsers::params::parse_params;
use crate::errors::CliErrors;
use crate::file_io::{load_image, save_image};
use crate::serde::FilterListing;

/// Print every filter with its parameters
fn list_filters(as_json: bool) -> Result<(), CliErrors> {
    if as_json {
        let listing = Filter::ALL.map(FilterListing::new);
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }
    for filter in Filter::ALL {
        println!("{:<22}{}", filter.name(), filter.label());

        for spec in filter.parameters() {
            println!(
                "{:<4}{:<18}{} to {}, default {}",
                "", spec.name, spec.min, spec.max, spec.default
            );
        }
    }
    Ok(())
}

/// Save a filter result, returns whether anything was written
fn write_result(result: Option<Image>, out_file: &Path) -> Result<bool, CliErrors> {
    match result {
        Some(image) => {
            save_image(&image, out_file)?;
            info!("Wrote {}", out_file.display());
            Ok(true)
        }
        None => Ok(false)
    }
}

pub(crate) fn run_filter_from_cmd(args: &ArgMatches) -> Result<(), CliErrors> {
    if args.get_flag("list") {
        return list_filters(args.get_flag("json"));
    }
    let filter = *args
        .get_one::<Filter>("filter")
        .ok_or(CliErrors::MissingArgument("filter"))?;

    let params = parse_params(args)?;

    let inputs = args
        .get_many::<PathBuf>("in")
        .ok_or(CliErrors::MissingArgument("input"))?
        .collect::<Vec<_>>();
    let outputs = args
        .get_many::<PathBuf>("out")
        .ok_or(CliErrors::MissingArgument("output"))?
        .collect::<Vec<_>>();

    if inputs.len() != outputs.len() {
        return Err(CliErrors::FileCountMismatch(inputs.len(), outputs.len()));
    }

    for (in_file, out_file) in inputs.into_iter().zip(outputs) {
        info!("Applying {filter} to {}", in_file.display());

        let image = load_image(in_file)?;

        if !write_result(filter.apply(Some(&image), &params)?, out_file)? {
            warn!("{filter} produced no image for {}", in_file.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use lumen_core::colorspace::ColorSpace;
    use lumen_image::image::Image;

    use crate::cmd_args::create_cmd_args;
    use crate::errors::CliErrors;
    use crate::file_io::{load_image, save_image};
    use crate::workflow::{run_filter_from_cmd, write_result};

    #[test]
    fn threshold_round_trip_through_files() {
        let dir = std::env::temp_dir();
        let input = dir.join(format!("lumen-{}-workflow-in.png", std::process::id()));
        let output = dir.join(format!("lumen-{}-workflow-out.png", std::process::id()));

        let image = Image::from_fn(4, 2, ColorSpace::BGR, |x, _, px| {
            *px = if x < 2 { [20; 3] } else { [220; 3] };
        })
        .unwrap();
        save_image(&image, &input).unwrap();

        let args: Vec<OsString> = vec![
            "lumen".into(),
            "-i".into(),
            input.clone().into_os_string(),
            "-o".into(),
            output.clone().into_os_string(),
            "-f".into(),
            "threshold".into(),
            "-p".into(),
            "threshold_value=100".into()
        ];
        let matches = create_cmd_args().try_get_matches_from(args).unwrap();
        run_filter_from_cmd(&matches).unwrap();

        let result = load_image(&output).unwrap();
        let _ = std::fs::remove_file(&input);
        let _ = std::fs::remove_file(&output);

        assert_eq!(result.pixel(0, 0), Some([0; 3]));
        assert_eq!(result.pixel(3, 1), Some([255; 3]));
    }

    #[test]
    fn nothing_is_written_without_a_result() {
        let output = std::env::temp_dir().join(format!("lumen-{}-workflow-none.png", std::process::id()));
        let _ = std::fs::remove_file(&output);

        assert!(!write_result(None, &output).unwrap());
        assert!(!output.exists());

        let image = Image::fill(7, ColorSpace::Luma, 2, 2).unwrap();
        assert!(write_result(Some(image), &output).unwrap());
        assert!(output.exists());
        let _ = std::fs::remove_file(&output);
    }

    #[test]
    fn inputs_need_outputs() {
        let matches = create_cmd_args()
            .try_get_matches_from(["lumen", "-i", "a.png", "-i", "b.png", "-o", "c.png", "-f", "otsu"])
            .unwrap();

        assert!(matches!(
            run_filter_from_cmd(&matches),
            Err(CliErrors::FileCountMismatch(2, 1))
        ));
    }
}
