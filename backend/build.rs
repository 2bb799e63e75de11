use std::fs;
use std::path::Path;

fn main() {
    let out_dir = Path::new("static");
    let dist_dir = Path::new("../frontend/dist");

    if dist_dir.exists() {
        let _ = fs::remove_dir_all(out_dir);
        fs::create_dir_all(out_dir).expect("cannot create static/");
        fs_extra::dir::copy(
            dist_dir,
            out_dir,
            &fs_extra::dir::CopyOptions::new().overwrite(true).copy_inside(true),
        )
        .expect("cannot copy the frontend bundle");
    } else {
        // The server still builds without a bundle; it then answers 404 for pages.
        fs::create_dir_all(out_dir.join("dist")).expect("cannot create static/dist");
    }
    println!("cargo:rerun-if-changed=../frontend/dist");
}
