// Author: Eshan Roy
// SPDX-License-Identifier: MIT

use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Only the short SHA is shown in the banner.
    EmitBuilder::builder().git_sha(true).emit()?;
    Ok(())
}
