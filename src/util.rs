use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub fn read_commands(path: &Path) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut commands = Vec::new();
    for line in reader.lines() {
        let line = line?;
        // return pressed
        if line.trim().is_empty() {
            continue;
        }
        commands.push(line);
    }

    Ok(commands)
}
