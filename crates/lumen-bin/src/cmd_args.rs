/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};
use lumen_filters::filters::Filter;

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("lumen")
        .about("Apply classic image filters to files")
        .arg(Arg::new("in")
            .short('i')
            .help("Input file to read data from")
            .long("input")
            .action(ArgAction::Append)
            .value_parser(value_parser!(PathBuf))
            .required_unless_present("list"))
        .arg(Arg::new("out")
            .short('o')
            .help("Output to write the data to")
            .long("output")
            .action(ArgAction::Append)
            .value_parser(value_parser!(PathBuf))
            .required_unless_present("list"))
        .arg(Arg::new("filter")
            .short('f')
            .long("filter")
            .help("Filter to apply, see --list")
            .value_parser(value_parser!(Filter))
            .required_unless_present("list"))
        .arg(Arg::new("param")
            .short('p')
            .long("param")
            .action(ArgAction::Append)
            .help_heading("PARAMETERS")
            .help("A key=value parameter for the filter, may be repeated")
            .long_help("A key=value parameter for the filter, may be repeated.\nValues are read as an integer, a float, a pair `a,b` or text, in that order.\nUnknown keys are ignored."))
        .arg(Arg::new("params-json")
            .long("params-json")
            .help_heading("PARAMETERS")
            .help("Parameters as a JSON object, --param entries override them"))
        .arg(Arg::new("list")
            .long("list")
            .action(ArgAction::SetTrue)
            .help("List the available filters and their parameters"))
        .arg(Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .requires("list")
            .help("Print the filter list as JSON"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the filters being run"))
}
