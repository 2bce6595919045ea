mod cube_cut_caps;
